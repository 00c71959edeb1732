use dotenv::dotenv;
use qianfan_lm::{LanguageModel, OptionMap, QianfanConfig, QianfanLm};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let config = QianfanConfig::from_env()?.with_model("ernie-4.0-turbo-8k");
    let mut lm = QianfanLm::new(config)?;

    let completions = lm
        .call(
            "Share a fun fact about Rust programming.",
            true,
            false,
            OptionMap::new(),
        )
        .await?;

    println!("Assistant:\n{}", completions[0]);

    Ok(())
}
