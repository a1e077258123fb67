use clap::{App, Arg};
use icogen::{IcoConverter, Size, Sizes};
use std::path::PathBuf;
use std::process;

//===========================================================================//

fn main() {
    env_logger::init();
    let matches = App::new("icoconvert")
        .version("0.1")
        .about("Creates an ICO file from PNG, GIF or JPEG images")
        .arg(
            Arg::with_name("output")
                .takes_value(true)
                .value_name("PATH")
                .short("o")
                .long("output")
                .help("Sets output path"),
        )
        .arg(
            Arg::with_name("size")
                .takes_value(true)
                .value_name("WxH")
                .short("s")
                .long("size")
                .multiple(true)
                .number_of_values(1)
                .help("Adds a size to render every image at"),
        )
        .arg(Arg::with_name("image").required(true).multiple(true))
        .get_matches();

    let out_path = if let Some(path) = matches.value_of("output") {
        PathBuf::from(path)
    } else {
        let mut path = PathBuf::from("out.ico");
        let mut index: i32 = 0;
        while path.exists() {
            index += 1;
            path = PathBuf::from(format!("out{}.ico", index));
        }
        path
    };
    let mut sizes = Vec::<Size>::new();
    for value in matches.values_of("size").into_iter().flatten() {
        match value.parse::<Size>() {
            Ok(size) => sizes.push(size),
            Err(error) => fail(&error.to_string()),
        }
    }
    let sizes = Sizes::from(sizes);

    let mut converter = IcoConverter::new();
    for path in matches.values_of("image").into_iter().flatten() {
        println!("Adding {:?}", path);
        if let Err(error) = converter.add_image(path, sizes.clone()) {
            fail(&error.to_string());
        }
    }
    if let Err(error) = converter.save(&out_path) {
        fail(&error.to_string());
    }
    for image in converter.images() {
        println!("{:5}x{:<5} {} bytes", image.width(), image.height(), image.size());
    }
    println!("Wrote {:?}", out_path);
}

fn fail(message: &str) -> ! {
    eprintln!("icoconvert: {}", message);
    process::exit(1);
}

//===========================================================================//
