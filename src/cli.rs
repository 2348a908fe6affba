use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "customerhub", about = "Customer registration client")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check whether the backend is awake
    Status {
        /// Send one long-timeout request so a sleeping host can spin up
        #[arg(long)]
        wake: bool,
    },
    /// Register a new customer
    Register(RegisterArgs),
    /// List registered customers
    Customers,
    /// Resolve the current position
    Locate(LocationArgs),
    /// Show the device fingerprint for a user agent
    Fingerprint {
        /// User-agent string (defaults to the configured one)
        user_agent: Option<String>,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct LocationArgs {
    /// Latitude in decimal degrees
    #[arg(long, allow_negative_numbers = true)]
    pub latitude: Option<f64>,

    /// Longitude in decimal degrees
    #[arg(long, allow_negative_numbers = true)]
    pub longitude: Option<f64>,
}

// Missing fields are left empty so validation can report all of them.
#[derive(Args, Debug, Clone)]
pub struct RegisterArgs {
    #[arg(long)]
    pub full_name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    /// 10 digits
    #[arg(long)]
    pub phone_number: Option<String>,

    #[arg(long)]
    pub gender: Option<String>,

    /// YYYY-MM-DD
    #[arg(long)]
    pub date_of_birth: Option<String>,

    #[arg(long)]
    pub address: Option<String>,

    /// At least 6 characters
    #[arg(long)]
    pub password: Option<String>,

    #[arg(long)]
    pub confirm_password: Option<String>,

    #[command(flatten)]
    pub location: LocationArgs,
}
