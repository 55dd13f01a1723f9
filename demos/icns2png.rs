//! Extracts every icon of an ICNS file, including those inside variant
//! elements, into PNG files next to it.
//!
//! ```shell
//! cargo run --example icns2png <path/to/file.icns>
//! # Icons will be saved to path/to/file.<index>.<ostype>.png
//! ```

use std::env;
use std::fs;
use std::path::Path;

fn main() {
    env_logger::init();
    if env::args().count() != 2 {
        println!("Usage: icns2png <path>");
        return;
    }
    let icns_path = env::args().nth(1).unwrap();
    let icns_path = Path::new(&icns_path);
    let icons = match web2exe_icons::icns_to_png(icns_path)
        .expect("failed to decode ICNS file") {
        Some(icons) => icons,
        None => {
            println!("{} does not exist", icns_path.display());
            return;
        }
    };
    for (index, icon) in icons.iter().enumerate() {
        let ostype = match icon.icon_type {
            Some(icon_type) => icon_type.ostype().to_string(),
            None => "unknown".to_string(),
        };
        let png_path =
            icns_path.with_extension(format!("{}.{}.png", index, ostype));
        fs::write(&png_path, &icon.data).expect("failed to write PNG file");
        println!("{}x{} -> {}", icon.width, icon.height, png_path.display());
    }
}
