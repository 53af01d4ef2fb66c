use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "waqt", version, author, about = "Daily prayer times and a live countdown in your terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch and print today's prayer times with the countdown to the next prayer
    Times {
        /// Country code (e.g. PK); requires --city
        #[arg(long, requires = "city", conflicts_with_all = ["lat", "lng"])]
        country: Option<String>,
        /// City name from the bundled list
        #[arg(long, requires = "country")]
        city: Option<String>,
        /// Latitude in degrees; requires --lng
        #[arg(long, requires = "lng", allow_negative_numbers = true)]
        lat: Option<String>,
        /// Longitude in degrees; requires --lat
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lng: Option<String>,
    },
    /// List supported countries and their calculation methods
    Countries,
    /// List bundled cities, optionally for one country
    Cities {
        /// Country code (e.g. IN)
        country: Option<String>,
    },
    /// List the calculation methods the timings service knows about
    Methods,
    /// Save the city used on startup
    SetCity {
        /// Country code (e.g. PK)
        country: String,
        /// City name (e.g. Karachi)
        city: String,
    },
    /// Forget the saved city so the next start resolves the location again
    Forget,
    /// Detect the current location and print the nearest name for it
    Locate,
    /// Print the effective configuration and file locations
    Config,
}
