//! Print the default configuration and where earshot looks for it.
//!
//! Run with: cargo run -p earshot-config --example config_demo

use earshot_config::{EarshotConfig, user_config_path};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("# user configuration: {}", user_config_path().display());
    println!();

    let config = EarshotConfig::default();
    config.validate()?;
    print!("{}", config.to_toml()?);

    let model = config.head_model()?;
    println!();
    println!(
        "# head shadow corner: {:.1} Hz at {} Hz",
        model.corner_hz(),
        model.sample_rate()
    );
    Ok(())
}
