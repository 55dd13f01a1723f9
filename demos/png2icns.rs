//! Creates an ICNS file containing a single icon, read from any image file
//! the `image` crate can open.
//!
//! ```shell
//! cargo run --example png2icns <path/to/file.png>
//! # ICNS will be saved to path/to/file.icns
//! ```
//!
//! The icon size is the largest supported edge (16, 32, 48, 128, 256, 512
//! or 1024) that does not exceed the longer side of the input.  Non-square
//! inputs are centered on a transparent square.

use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if env::args().count() != 2 {
        println!("Usage: png2icns <path>");
        return;
    }
    let image_path = env::args().nth(1).unwrap();
    let image_path = Path::new(&image_path);
    let icns_path = image_path.with_extension("icns");
    let written = web2exe_icons::save_icns(image_path, &icns_path)
        .expect("failed to encode ICNS file");
    if written {
        println!("Wrote {}", icns_path.display());
    } else {
        println!("PNG support is disabled; nothing written");
    }
}
