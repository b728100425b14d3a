//! Lumara CLI - Live Photo Filtering
//!
//! This is a demonstration CLI for the Lumara library.

use anyhow::Context;
use lumara::prelude::*;

fn main() {
    env_logger::init();

    println!("🎨 Lumara - Live Photo Filtering v{}", lumara::VERSION);
    println!();

    // Parse command line args
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage(&args[0]);
        return;
    }

    match args[1].as_str() {
        "list" => list_filters(args.iter().any(|arg| arg == "--json")),
        "info" => {
            if args.len() < 3 {
                eprintln!("Error: Please specify a filter ID");
                return;
            }
            filter_info(&args[2]);
        }
        "process" => {
            if args.len() < 4 {
                eprintln!("Error: Please specify input and album paths");
                eprintln!(
                    "Usage: {} process <input> <album-dir> [--filter <id>] [options]",
                    args[0]
                );
                return;
            }
            if let Err(err) = process_image(&args[2..]) {
                eprintln!("❌ {err:#}");
                std::process::exit(1);
            }
        }
        "help" | "--help" | "-h" => print_usage(&args[0]),
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            print_usage(&args[0]);
        }
    }
}

fn print_usage(program: &str) {
    println!("Usage: {} <command> [options]", program);
    println!();
    println!("Commands:");
    println!("  list [--json]     List all available filters");
    println!("  info <filter>     Show detailed info about a filter");
    println!("  process <input> <album-dir> [options]  Filter an image into an album");
    println!("  help              Show this help message");
    println!();
    println!("Process options:");
    println!("  --filter <id>            Filter to apply (default: sepia-tone)");
    println!("  --intensity <0..1>       Intensity slider position");
    println!("  --radius <0..1>          Radius slider position");
    println!("  --radius-multiplier <n>  Radius multiplier, 1 to 2000 (default: 100)");
    println!("  --angle <0..360>         Angle in degrees");
    println!("  --format <png|jpg>       Album file format (default: png)");
    println!("  --quality <1..100>       JPEG quality (default: 90)");
}

fn list_filters(json: bool) {
    let catalog = FilterCatalog::new();

    if json {
        let descriptors: Vec<_> = catalog.descriptors().collect();
        match serde_json::to_string_pretty(&descriptors) {
            Ok(out) => println!("{out}"),
            Err(err) => eprintln!("❌ Serialization failed: {err}"),
        }
        return;
    }

    println!("Available filters ({} total):", catalog.len());
    println!();

    for descriptor in catalog.descriptors() {
        println!("  • {} - {}", descriptor.id, descriptor.description);
        if descriptor.capabilities.is_empty() {
            println!("      fixed function, no adjustable parameters");
        } else {
            println!("      accepts: {}", descriptor.capabilities);
        }
    }
}

fn filter_info(filter_id: &str) {
    let catalog = FilterCatalog::new();

    match catalog.get_by_id(filter_id) {
        Some(descriptor) => {
            println!("Filter: {}", descriptor.name);
            println!("ID: {}", descriptor.id);
            println!();
            println!("Description:");
            println!("  {}", descriptor.description);
            println!();
            println!("Accepts: {}", descriptor.capabilities);

            if !descriptor.controls.is_empty() {
                println!();
                println!("Controls:");
                for hint in &descriptor.controls {
                    println!(
                        "  • {} [{} to {}] (default: {})",
                        hint.label, hint.min, hint.max, hint.default
                    );
                }
            }
        }
        None => {
            eprintln!("Filter not found: {}", filter_id);
            eprintln!("Use 'list' to see available filters.");
        }
    }
}

fn process_image(args: &[String]) -> anyhow::Result<()> {
    let input = &args[0];
    let album_dir = &args[1];

    // Parse options
    let mut filter_id = String::from("sepia-tone");
    let mut ticks: Vec<(ControlKind, f64)> = Vec::new();
    let mut format_name = String::from("png");
    let mut quality: u8 = 90;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--filter" if i + 1 < args.len() => {
                filter_id = args[i + 1].clone();
                i += 2;
            }
            "--intensity" if i + 1 < args.len() => {
                if let Ok(value) = args[i + 1].parse() {
                    ticks.push((ControlKind::Intensity, value));
                }
                i += 2;
            }
            "--radius" if i + 1 < args.len() => {
                if let Ok(value) = args[i + 1].parse() {
                    ticks.push((ControlKind::Radius, value));
                }
                i += 2;
            }
            "--radius-multiplier" if i + 1 < args.len() => {
                if let Ok(value) = args[i + 1].parse() {
                    ticks.push((ControlKind::RadiusMultiplier, value));
                }
                i += 2;
            }
            "--angle" if i + 1 < args.len() => {
                if let Ok(value) = args[i + 1].parse() {
                    ticks.push((ControlKind::Angle, value));
                }
                i += 2;
            }
            "--format" if i + 1 < args.len() => {
                format_name = args[i + 1].to_lowercase();
                i += 2;
            }
            "--quality" if i + 1 < args.len() => {
                quality = args[i + 1].parse().unwrap_or(90);
                i += 2;
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                i += 1;
            }
        }
    }

    let format = match format_name.as_str() {
        "png" => AlbumFormat::Png,
        "jpg" | "jpeg" => AlbumFormat::Jpeg { quality },
        other => anyhow::bail!("unsupported format '{other}', expected png or jpg"),
    };

    let catalog = FilterCatalog::new();
    let descriptor = catalog
        .get_by_id(&filter_id)
        .with_context(|| format!("unknown filter '{filter_id}', use 'list' to see them"))?;

    let mut source = PathSource::new(input);
    let picked = source
        .pick()
        .with_context(|| format!("cannot open {input}"))?;
    let Some(image) = picked.into_image() else {
        anyhow::bail!("no input image selected");
    };

    println!("⚙️  Processing {} with '{}'", input, descriptor.id);
    let mut session = Session::new(descriptor);
    session.load(image);

    for (control, value) in ticks {
        if !descriptor.has_control(control) {
            println!(
                "⚠️  '{}' does not use {}; the value is kept but not applied",
                descriptor.id,
                control.label()
            );
        }
        session.set_parameter(control, value);
    }

    if !session.has_processed() {
        anyhow::bail!("processing produced no output");
    }

    // The writer completes on its own thread and reports back through
    // callbacks; block here until one of them fires.
    let album = DirectoryAlbum::with_format(album_dir, format);
    let (tx, rx) = std::sync::mpsc::channel();
    let done = tx.clone();
    session.save(
        &album,
        Box::new(move |path| {
            let _ = done.send(Ok(path));
        }),
        Box::new(move |err| {
            let _ = tx.send(Err(err));
        }),
    );

    match rx.recv()? {
        Ok(path) => println!("🎉 Saved to: {}", path.display()),
        Err(err) => anyhow::bail!("save failed: {err}"),
    }

    Ok(())
}
