//! Replaces the primary icon of a Windows executable.
//!
//! ```shell
//! cargo run --example replaceicon <app.exe> <icon.png> <output.exe>
//! ```
//!
//! Set `RUST_LOG=trace` to see the resource tree walk.

use std::env;

use web2exe_icons::pe::PeFile;

fn main() {
    env_logger::init();
    let args: Vec<String> = env::args().collect();
    if args.len() != 4 {
        println!("Usage: replaceicon <exe> <icon> <output>");
        return;
    }
    let mut exe = PeFile::open(&args[1]).expect("failed to parse executable");
    println!("{} ({:?}), resources: {}",
             exe.coff_header().machine_name(),
             exe.optional_header().kind,
             exe.resource_type_names().join(", "));
    exe.replace_icon(&args[2]).expect("failed to replace icon");
    exe.write(&args[3]).expect("failed to write executable");
    println!("Wrote {} bytes to {}", exe.data().len(), args[3]);
}
