// Subcommand definitions and dispatch
//
// One subcommand per API endpoint. Argument arity and integer parsing are
// validated here, locally, so a malformed invocation never produces HTTP
// traffic. The exit code contract is 0 iff the envelope reports success.

use clap::{Parser, Subcommand};

use crate::client::RemoteClient;
use crate::protocol::Envelope;

#[derive(Debug, Parser)]
#[command(
    name = "remoto",
    about = "Command-line client for the remoto control server",
    version,
    after_help = "EXAMPLES:\n    \
        remoto status\n    \
        remoto move-mouse 500 300\n    \
        remoto click 500 300 right\n    \
        remoto type Hello World\n    \
        remoto press enter\n    \
        remoto exec ls -la"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, PartialEq, Subcommand)]
pub enum Command {
    /// Check that the server is up and report its identity
    Status,

    /// Read the screen dimensions
    ReadScreen,

    /// Move the mouse to absolute coordinates
    MoveMouse {
        // Negative coordinates are valid on multi-monitor layouts
        #[arg(allow_negative_numbers = true)]
        x: i32,
        #[arg(allow_negative_numbers = true)]
        y: i32,
    },

    /// Click at coordinates, or at the current position with no arguments
    Click {
        #[arg(requires = "y", allow_negative_numbers = true)]
        x: Option<i32>,
        #[arg(allow_negative_numbers = true)]
        y: Option<i32>,
        /// Mouse button: left, right or middle
        button: Option<String>,
    },

    /// Type text on the keyboard (arguments are joined with spaces)
    Type {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Press a single key (enter, tab, esc, arrows, or one character)
    Press { key: String },

    /// Open a URL in the server's default browser
    Open { url: String },

    /// Execute a shell command on the server (arguments are joined)
    Exec {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },
}

/// Run one subcommand against the server and hand back the exit code
pub async fn run(command: Command) -> i32 {
    let client = match RemoteClient::new() {
        Ok(client) => client,
        Err(error) => {
            eprintln!("ERROR: {error:#}");
            return 1;
        }
    };

    let envelope = match command {
        Command::Status => client.status().await,
        Command::ReadScreen => client.read_screen().await,
        Command::MoveMouse { x, y } => client.move_mouse(x, y).await,
        Command::Click { x, y, button } => {
            let position = match (x, y) {
                (Some(x), Some(y)) => Some((x, y)),
                _ => None,
            };
            client.click(position, button).await
        }
        Command::Type { text } => client.type_text(&text.join(" "), None).await,
        Command::Press { key } => client.press_key(&key).await,
        Command::Open { url } => client.open_browser(&url).await,
        Command::Exec { command } => client.execute_command(&command.join(" ")).await,
    };

    print_result(&envelope)
}

/// Render an envelope for humans and scripts
///
/// Success goes to stdout as `OK: <message>`, with pretty-printed data
/// beneath when there is any. Failure goes to stderr as `ERROR: <message>`.
/// Returns the process exit code: 0 iff the envelope reports success.
pub fn print_result(envelope: &Envelope) -> i32 {
    if envelope.success {
        println!("OK: {}", envelope.message);
        if !envelope.data.is_empty() {
            match serde_json::to_string_pretty(&envelope.data) {
                Ok(pretty) => println!("Data: {pretty}"),
                Err(_) => println!("Data: {:?}", envelope.data),
            }
        }
        0
    } else {
        eprintln!("ERROR: {}", envelope.message);
        1
    }
}
