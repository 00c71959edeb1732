use dotenv::dotenv;
use qianfan_lm::{InteractionMode, LanguageModel, OptionMap, QianfanConfig, QianfanLm};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let config = QianfanConfig::from_env()?
        .with_mode(InteractionMode::Completion)
        .with_default_option("temperature", json!(0.2));
    let mut lm = QianfanLm::new(config)?;

    let mut overrides = OptionMap::new();
    overrides.insert("top_p".to_string(), json!(0.8));

    let completions = lm.call("Once upon a time", true, false, overrides).await?;
    println!("Completion:\n{}", completions[0]);

    for record in lm.history() {
        println!(
            "recorded call: prompt={:?}, options={} keys",
            record.prompt,
            record.options.len()
        );
    }

    Ok(())
}
