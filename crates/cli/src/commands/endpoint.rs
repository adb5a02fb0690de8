//! Inference endpoint probe

use std::time::Instant;

use anyhow::Result;
use colored::Colorize;
use tabled::Tabled;

use crate::client::{ChatRequest, ChatResponse, InferenceClient, ModelList};
use crate::output::{print_info, print_success, print_warning, OutputFormat};

/// Row for the served models table
#[derive(Tabled)]
struct ModelRow {
    #[tabled(rename = "Model")]
    id: String,
    #[tabled(rename = "Owned By")]
    owned_by: String,
}

/// Probe an OpenAI-compatible endpoint: list served models and, when a
/// model is named, send one small chat completion. Single-shot, no retries.
pub async fn check(
    client: &InferenceClient,
    model: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let started = Instant::now();
    let models: Result<ModelList> = client.get("v1/models").await;
    let list_latency_ms = started.elapsed().as_millis();

    let models = match models {
        Ok(models) => models,
        Err(err) => {
            match format {
                OutputFormat::Json => {
                    let json = serde_json::json!({
                        "reachable": false,
                        "error": err.to_string(),
                    });
                    println!("{}", serde_json::to_string_pretty(&json)?);
                }
                OutputFormat::Table => {
                    print_warning(&format!("Endpoint unreachable: {}", err));
                    print_info("Check that the serving service is exposed, e.g.:");
                    println!("  kubectl port-forward svc/<inference-service> 8000:8000");
                }
            }
            return Ok(());
        }
    };

    let completion = match model {
        Some(model) => {
            let started = Instant::now();
            let response: ChatResponse = client
                .post("v1/chat/completions", &ChatRequest::probe(model))
                .await?;
            Some((response, started.elapsed().as_millis()))
        }
        None => None,
    };

    match format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "reachable": true,
                "models_latency_ms": list_latency_ms,
                "models": models.data,
                "completion": completion.as_ref().map(|(response, latency_ms)| {
                    serde_json::json!({
                        "latency_ms": latency_ms,
                        "response": response,
                    })
                }),
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Table => {
            print_success(&format!(
                "Endpoint reachable, {} models served ({} ms)",
                models.data.len(),
                list_latency_ms
            ));

            if !models.data.is_empty() {
                let rows: Vec<ModelRow> = models
                    .data
                    .iter()
                    .map(|m| ModelRow {
                        id: m.id.clone(),
                        owned_by: m.owned_by.clone().unwrap_or_else(|| "-".to_string()),
                    })
                    .collect();
                let table = tabled::Table::new(rows)
                    .with(tabled::settings::Style::rounded())
                    .to_string();
                println!("{}", table);
            }

            if let Some((response, latency_ms)) = completion {
                let content = response
                    .choices
                    .first()
                    .map(|c| c.message.content.trim())
                    .unwrap_or("(empty response)");
                print_success(&format!("Completion in {} ms", latency_ms));
                println!("  {}", content.cyan());
            }
        }
    }

    Ok(())
}
