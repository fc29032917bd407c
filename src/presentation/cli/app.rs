use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// vitals — moniteur de télémétrie matérielle
///
/// Samples hardware metrics over a bounded session, classifies
/// threshold crossings into alerts, and derives maintenance
/// recommendations.
#[derive(Parser, Debug)]
#[command(name = "vitals")]
#[command(version, about, long_about)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to custom config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Lancer une session de surveillance bornée
    #[command(alias = "m")]
    Monitor {
        /// Durée de la session en minutes (défaut : config)
        #[arg(short, long)]
        duration: Option<u64>,

        /// Intervalle d'échantillonnage en secondes (défaut : config)
        #[arg(short, long)]
        interval: Option<u64>,

        /// Exporter la série temporelle et le rapport en fin de session
        #[arg(short, long)]
        export: bool,

        /// Dossier de destination des exports (défaut : config)
        #[arg(short, long)]
        output_dir: Option<String>,
    },

    /// Afficher une lecture instantanée des capteurs
    #[command(alias = "s")]
    Status {
        /// Sortie au format JSON
        #[arg(long)]
        json: bool,
    },
}
