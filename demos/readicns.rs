use std::env;
use std::fs::File;
use std::io::BufReader;

use web2exe_icons::IconFamily;

fn main() {
    env_logger::init();
    if env::args().count() != 2 {
        println!("Usage: readicns <path>");
        return;
    }
    let path = env::args().nth(1).unwrap();
    let file = File::open(path).expect("failed to open file");
    let buffered = BufReader::new(file);
    let family = IconFamily::read(buffered).expect("failed to read ICNS file");
    println!("ICNS file contains {} element(s).", family.elements.len());
    for (index, element) in family.elements.iter().enumerate() {
        let info = element.info();
        let kind = if element.ostype().is_variant() {
            "variant".to_string()
        } else if info.icon_type.is_some() {
            format!("{}x{}, {} bpp", info.width, info.height, info.bit_depth)
        } else {
            "unknown".to_string()
        };
        println!("Element {}: {} ({}; {} byte payload)",
                 index,
                 element.ostype(),
                 kind,
                 element.data().len());
    }
}
