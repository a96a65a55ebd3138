use std::{env, process};

use sigcheck_signature::{
    locator::{Archive, ResourceLoader},
    parse, ClassDescription, Locator,
};

// Usage:
//   dump_signature path/to/current.api
//   dump_signature bundle.zip!/current.api.gz
//   dump_signature resource:current.api   (searched in $SIGCHECK_RESOURCE_PATH)
fn main() {
    pretty_env_logger::init();

    let Some(arg) = env::args().nth(1) else {
        eprintln!("usage: dump_signature <file | archive!/entry | resource:name>");
        process::exit(2);
    };

    let locator = match locator(&arg) {
        Ok(locator) => locator,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    let classes = match parse(&locator) {
        Ok(classes) => classes,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    for class in classes {
        match class {
            Ok(class) => print_class(&class),
            Err(e) => {
                eprintln!("{}", e);
                process::exit(1);
            }
        }
    }
}

fn locator(arg: &str) -> Result<Locator, sigcheck_signature::locator::LocatorError> {
    if let Some(name) = arg.strip_prefix("resource:") {
        return Locator::named_resource(&ResourceLoader::from_env(), name);
    }

    match arg.split_once("!/") {
        Some((archive, entry)) => Ok(Locator::archive_entry(&Archive::open(archive)?, entry)),
        None => Ok(Locator::local_file(arg)),
    }
}

fn print_class(class: &ClassDescription) {
    println!("{:?} {} (0x{:04x})", class.kind(), class, class.modifiers().bits());
    if let Some(superclass) = class.superclass() {
        println!("    extends {}", superclass);
    }
    for interface in class.interfaces() {
        println!("    implements {}", interface);
    }
    for constructor in class.constructors() {
        println!(
            "    {}({}) throws [{}]",
            constructor.name,
            constructor.parameter_types.join(", "),
            constructor.exception_types.join(", ")
        );
    }
    for method in class.methods() {
        println!(
            "    {} {}({}) throws [{}]",
            method.return_type,
            method.name,
            method.parameter_types.join(", "),
            method.exception_types.join(", ")
        );
    }
    for field in class.fields() {
        match &field.value {
            Some(value) => println!("    {} {} = {:?}", field.field_type, field.name, value),
            None => println!("    {} {}", field.field_type, field.name),
        }
    }
}
