use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "mtlsctl")]
#[command(about = "Management CLI for the mTLS certificate manager proxy", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8787")]
    url: String,

    #[arg(long, env = "MTLS_MANAGER_AUTH_EMAIL")]
    email: String,

    #[arg(long, env = "MTLS_MANAGER_AUTH_KEY")]
    key: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List zones
    Zones,
    /// List mTLS certificates for an account
    Certificates {
        #[arg(long)]
        account_id: String,
    },
    /// List hostname associations for a zone
    Associations {
        #[arg(long)]
        zone_id: String,
        /// Restrict to one certificate id ("all" for no filter)
        #[arg(long)]
        cert_id: Option<String>,
    },
    /// Show client-certificate-forwarding settings for a zone
    Forwarding {
        #[arg(long)]
        zone_id: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    headers.insert("X-Auth-Email", HeaderValue::from_str(&cli.email)?);
    headers.insert("X-Auth-Key", HeaderValue::from_str(&cli.key)?);

    let url = match &cli.command {
        Commands::Zones => format!("{}/api/zones", cli.url),
        Commands::Certificates { account_id } => {
            format!("{}/api/certificates?accountId={}", cli.url, account_id)
        }
        Commands::Associations { zone_id, cert_id } => {
            let mut url = format!("{}/api/zones/{}/hostname_associations", cli.url, zone_id);
            if let Some(cert_id) = cert_id {
                url.push_str(&format!("?certId={cert_id}"));
            }
            url
        }
        Commands::Forwarding { zone_id } => {
            format!("{}/api/zones/{}/certificate_forwarding", cli.url, zone_id)
        }
    };

    let res = client.get(url).headers(headers).send().await?;
    print_response(res).await?;

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let body: Value = res.json().await?;
    println!("HTTP {status}");
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}
