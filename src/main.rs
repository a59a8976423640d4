//! Show a bounded value as a filled bar in a window.
//!
//! Integer lines on stdin become the bar's value. With `--random` the value
//! follows a random walk instead.
//!
//! ```text
//! seq 0 100 | fillbar --font Roboto-Black.ttf --label Load
//! ```

use clap::{Parser, ValueEnum};
use fillbar::{BarCommand, BarConfig, BarStyle, Orientation, ProgressBar, TextStyle};
use log::{info, warn};
use rand::Rng;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StyleArg {
    None,
    Value,
    ValueOverMaximum,
    Percentage,
    Text,
    TextAndPercentage,
    TextAndValueOverMaximum,
}

impl From<StyleArg> for TextStyle {
    fn from(arg: StyleArg) -> Self {
        match arg {
            StyleArg::None => TextStyle::None,
            StyleArg::Value => TextStyle::Value,
            StyleArg::ValueOverMaximum => TextStyle::ValueOverMaximum,
            StyleArg::Percentage => TextStyle::Percentage,
            StyleArg::Text => TextStyle::Text,
            StyleArg::TextAndPercentage => TextStyle::TextAndPercentage,
            StyleArg::TextAndValueOverMaximum => TextStyle::TextAndValueOverMaximum,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "fillbar", version, about = "Show a bounded value as a filled bar")]
struct Args {
    /// TrueType/OpenType font used for the overlay text
    #[arg(long)]
    font: PathBuf,

    #[arg(long, default_value_t = 400)]
    width: usize,

    #[arg(long, default_value_t = 23)]
    height: usize,

    /// Fill from the bottom up instead of left to right
    #[arg(long)]
    vertical: bool,

    #[arg(long, value_enum, default_value_t = StyleArg::TextAndPercentage)]
    style: StyleArg,

    #[arg(long, default_value = "")]
    label: String,

    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    minimum: i32,

    #[arg(long, default_value_t = 100, allow_hyphen_values = true)]
    maximum: i32,

    /// Drive the bar with a random walk instead of stdin
    #[arg(long)]
    random: bool,
}

fn spawn_stdin_reader(sender: Sender<BarCommand>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    warn!("stopped reading stdin: {err}");
                    break;
                }
            };
            match line.trim().parse::<i32>() {
                Ok(value) => {
                    if sender.send(BarCommand::SetValue(value)).is_err() {
                        break;
                    }
                }
                Err(_) => warn!("ignoring non-integer input {line:?}"),
            }
        }
    });
}

fn spawn_random_walk(sender: Sender<BarCommand>, minimum: i32, maximum: i32) {
    thread::spawn(move || {
        let mut rng = rand::rng();
        let mut value = minimum;
        loop {
            value = value
                .saturating_add(rng.random_range(-3..=6))
                .clamp(minimum, maximum.max(minimum));
            if sender.send(BarCommand::SetValue(value)).is_err() {
                break;
            }
            thread::sleep(Duration::from_millis(100));
        }
    });
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let font_data: Arc<[u8]> = std::fs::read(&args.font)?.into();
    let style = BarStyle::builder()
        .orientation(if args.vertical {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        })
        .text_style(args.style.into())
        .label(args.label.clone())
        .build();
    let config = BarConfig::builder()
        .range((args.minimum, args.maximum))
        .initial_value(args.minimum)
        .window_width(args.width)
        .window_height(args.height)
        .style(style)
        .font_data(font_data)
        .build();

    let mut bar = ProgressBar::new(config);
    bar.on_value_changed(|value| info!("value changed to {value}"));

    let (sender, receiver) = mpsc::channel();
    if args.random {
        spawn_random_walk(sender, args.minimum, args.maximum);
    } else {
        spawn_stdin_reader(sender);
    }

    bar.show_with_commands(receiver)
}
