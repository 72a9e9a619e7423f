use clap::{Parser, Subcommand};
use cropper::config::{self, CliOverrides};
use cropper::imaging::RustBackend;
use cropper::imaging::rust_backend::supported_input_extensions;
use cropper::output;
use cropper::script::{self, Command as Gesture};
use cropper::workbench::{Event, Workbench};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// Config overrides shared by the commands that export.
#[derive(clap::Args, Clone)]
struct OverrideArgs {
    /// Output format for crops: png, jpg, jpeg, tif, tiff (default: keep source)
    #[arg(long)]
    format: Option<String>,
    /// PDF resolution in dots per inch (minimum 36)
    #[arg(long)]
    dpi: Option<i64>,
    /// Downsample every crop by this integer factor
    #[arg(long)]
    divisor: Option<i64>,
    /// Extra pixels whited out around each region on the reference sheet
    #[arg(long)]
    clean_margin: Option<i64>,
    /// Discard drags shorter than this many screen pixels
    #[arg(long)]
    min_drag: Option<i64>,
    /// Also write <IMAGE>.pdf
    #[arg(long)]
    pdf: bool,
    /// Also write crop 0: the source with every region whited out
    #[arg(long)]
    reference_sheet: bool,
}

impl OverrideArgs {
    fn to_overrides(&self) -> CliOverrides {
        CliOverrides {
            min_drag_size: self.min_drag,
            format: self.format.clone(),
            dpi: self.dpi,
            divisor: self.divisor,
            clean_margin: self.clean_margin,
            pdf: self.pdf,
            reference_sheet: self.reference_sheet,
        }
    }
}

#[derive(Parser)]
#[command(name = "cropper")]
#[command(about = "Mark several regions on one image and export each as its own file")]
#[command(long_about = "\
Mark several regions on one image and export each as its own file

A session shows the image fitted into a 896x608 canvas with a 16 pixel
margin. Drags on that canvas become regions in full-resolution pixels:

  press 16 16            # start a drag at canvas (16, 16)
  move 216 116           # live size in source pixels
  release 216 116        # region 1
  zoom                   # the next drag picks the view instead
  drag 100 100 400 300
  auto                   # add the content box of the current view
  plus                   # merge the last two regions
  crops                  # write photo__crop__1.jpg, ... and exit

Run 'cropper gen-config' to generate a documented cropper.toml.")]
#[command(version)]
struct Cli {
    /// Config file (missing file = stock defaults)
    #[arg(long, default_value = config::CONFIG_FILE_NAME, global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a region session on an image, from a script or the prompt
    Session {
        /// Source image
        image: PathBuf,
        /// Read commands from this file instead of stdin
        #[arg(long)]
        script: Option<PathBuf>,
        /// Print the final regions as JSON
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        overrides: OverrideArgs,
    },
    /// Detect the content box of the whole image and export it
    Auto {
        /// Source image
        image: PathBuf,
        #[command(flatten)]
        overrides: OverrideArgs,
    },
    /// Print a stock cropper.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Session {
            image,
            script,
            json,
            overrides,
        } => {
            let config = config::load_config(&cli.config, &overrides.to_overrides())?;
            warn_if_unsupported(&image);
            let mut bench = Workbench::open(RustBackend::new(), &image, &config)?;
            match script {
                Some(path) => {
                    for gesture in script::load_script(&path)? {
                        output::print_event(&bench.apply(&gesture)?);
                        if bench.is_finished() {
                            break;
                        }
                    }
                }
                None => run_interactive(&mut bench)?,
            }
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&bench.session().exported())?
                );
            }
        }
        Command::Auto { image, overrides } => {
            let config = config::load_config(&cli.config, &overrides.to_overrides())?;
            warn_if_unsupported(&image);
            let mut bench = Workbench::open(RustBackend::new(), &image, &config)?;
            let event = bench.apply(&Gesture::Auto)?;
            output::print_event(&event);
            if let Event::Detected(_) = event {
                output::print_event(&bench.apply(&Gesture::Crops)?);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Decoding sniffs the content, so an odd extension is only worth a warning.
fn warn_if_unsupported(image: &Path) {
    let ext = image
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    if !supported_input_extensions().contains(&ext.as_str()) {
        log::warn!(
            "{}: unrecognized extension, expected one of {}",
            image.display(),
            supported_input_extensions().join(", ")
        );
    }
}

/// Read commands from stdin until `crops`, `quit` or end of input.
///
/// Parse and I/O errors are reported and the prompt continues.
fn run_interactive(bench: &mut Workbench<RustBackend>) -> std::io::Result<()> {
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    while !bench.is_finished() {
        print!("{} > ", output::format_status(bench.session()));
        std::io::stdout().flush()?;

        let Some(line) = lines.next().transpose()? else {
            println!();
            break;
        };
        match script::parse_line(&line) {
            Ok(Some(gesture)) => match bench.apply(&gesture) {
                Ok(event) => output::print_event(&event),
                Err(e) => eprintln!("error: {}", e),
            },
            Ok(None) => {}
            Err(e) => eprintln!("error: {}", e),
        }
    }
    Ok(())
}
