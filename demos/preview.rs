use analog_clock::logging::{init_logging, LoggingConfig};
use analog_clock::{AnalogClock, ClockConfig, Color, Palette};
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(LoggingConfig::default());

    // A smaller face on a dark background, running ten times faster than
    // real time and starting one hour, one minute and one second in.
    let config = ClockConfig::builder()
        .title("Analog Clock Preview".to_string())
        .window_size(400)
        .tick_interval(Duration::from_millis(100))
        .numeral_font_size(16.0)
        .palette(Palette {
            background: Color::new(0x20, 0x20, 0x24),
            light: Color::new(0x70, 0x70, 0x78),
            dark: Color::new(0xe0, 0xe0, 0xe0),
            hour_hand: Color::WHITE,
            accent: Color::new(0xff, 0x8c, 0x00),
        })
        .geometry(analog_clock::FaceGeometry {
            dial_radius: 180.0,
            ..Default::default()
        })
        .build();

    println!("Displaying preview clock:");
    println!("- counter starts at 3661s (hour hand at the 2 o'clock mark)");
    println!("- one tick every 100ms");
    println!("Close the window to exit");

    let mut clock = AnalogClock::new(config).starting_at(3661);
    clock.show()?;
    Ok(())
}
