//! Seeds a running API instance with fixture shipments over HTTP.
//!
//! Usage: `cargo run --bin seed-shipments -- --base-url http://localhost:8000`

use clap::Parser;
use serde_json::{json, Value};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "seed-shipments", about = "Seed the track and trace API with fixture shipments")]
struct Args {
    /// Base URL of a running API instance
    #[arg(long, default_value = "http://localhost:8000")]
    base_url: String,
}

fn fixture_shipments() -> Vec<Value> {
    vec![
        json!({
            "shipment": {
                "tracking_number": "TN12345678",
                "carrier": "DHL",
                "sender_address": "Street 10, 75001 Paris, France",
                "receiver_address": "Lisa-Fittko-Str 13, 10557 Berlin, Germany",
                "status": "in_transit"
            },
            "articles": [
                {"name": "Laptop", "quantity": 1, "price": 800.0, "sku": "LP123"},
                {"name": "Mouse", "quantity": 1, "price": 25.0, "sku": "MO456"}
            ]
        }),
        json!({
            "shipment": {
                "tracking_number": "TN12345679",
                "carrier": "UPS",
                "sender_address": "Street 2, 20144 Hamburg, Germany",
                "receiver_address": "Street 20, 1000 Brussels, Belgium",
                "status": "inbound_scan"
            },
            "articles": [
                {"name": "Monitor", "quantity": 2, "price": 200.0, "sku": "MT789"}
            ]
        }),
        json!({
            "shipment": {
                "tracking_number": "TN12345680",
                "carrier": "DPD",
                "sender_address": "Street 3, 80331 Munich, Germany",
                "receiver_address": "Street 5, 28013 Madrid, Spain",
                "status": "delivery"
            },
            "articles": [
                {"name": "Keyboard", "quantity": 1, "price": 50.0, "sku": "KB012"},
                {"name": "Mouse", "quantity": 1, "price": 25.0, "sku": "MO456"}
            ]
        }),
        json!({
            "shipment": {
                "tracking_number": "TN12345681",
                "carrier": "FedEx",
                "sender_address": "Street 4, 50667 Cologne, Germany",
                "receiver_address": "Street 9, 1016 Amsterdam, Netherlands",
                "status": "transit"
            },
            "articles": [
                {"name": "Laptop", "quantity": 1, "price": 900.0, "sku": "LP345"},
                {"name": "Headphones", "quantity": 1, "price": 100.0, "sku": "HP678"}
            ]
        }),
        json!({
            "shipment": {
                "tracking_number": "TN12345682",
                "carrier": "GLS",
                "sender_address": "Street 5, 70173 Stuttgart, Germany",
                "receiver_address": "Street 15, 1050 Copenhagen, Denmark",
                "status": "scanned"
            },
            "articles": [
                {"name": "Smartphone", "quantity": 1, "price": 500.0, "sku": "SP901"},
                {"name": "Charger", "quantity": 1, "price": 20.0, "sku": "CH234"}
            ]
        }),
    ]
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracktrace_api::config::init_tracing("info", false);
    let args = Args::parse();

    let endpoint = format!("{}/api/v1/shipments/", args.base_url.trim_end_matches('/'));
    let client = reqwest::Client::new();

    let mut created = 0;
    let mut skipped = 0;
    for payload in fixture_shipments() {
        let tracking_number = payload["shipment"]["tracking_number"]
            .as_str()
            .unwrap_or_default()
            .to_string();
        let response = client.post(&endpoint).json(&payload).send().await?;

        match response.status().as_u16() {
            201 => {
                created += 1;
                info!(tracking_number, "created shipment");
            }
            204 => {
                skipped += 1;
                info!(tracking_number, "shipment already exists, skipped");
            }
            status => {
                warn!(
                    tracking_number,
                    status,
                    body = %response.text().await.unwrap_or_default(),
                    "unexpected response"
                );
            }
        }
    }

    info!(created, skipped, "seeding complete");
    Ok(())
}
