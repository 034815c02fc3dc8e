//! The `bandcheck init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create bandcheck.toml
    if std::path::Path::new("bandcheck.toml").exists() {
        println!("bandcheck.toml already exists, skipping.");
    } else {
        std::fs::write("bandcheck.toml", SAMPLE_CONFIG)?;
        println!("Created bandcheck.toml");
    }

    // Create example topic and essay
    std::fs::create_dir_all("essays")?;
    let topic_path = std::path::Path::new("essays/topic.txt");
    if topic_path.exists() {
        println!("essays/topic.txt already exists, skipping.");
    } else {
        std::fs::write(topic_path, EXAMPLE_TOPIC)?;
        println!("Created essays/topic.txt");
    }

    let essay_path = std::path::Path::new("essays/example.txt");
    if essay_path.exists() {
        println!("essays/example.txt already exists, skipping.");
    } else {
        std::fs::write(essay_path, EXAMPLE_ESSAY)?;
        println!("Created essays/example.txt");
    }

    println!("\nNext steps:");
    println!("  1. Edit bandcheck.toml to point at your scoring service");
    println!("  2. Run: bandcheck evaluate --essay essays/example.txt --topic essays/topic.txt");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# bandcheck configuration

endpoint = "http://localhost:8080"
timeout_secs = 120
max_retries = 3
retry_delay_ms = 1000
parallelism = 4
output_dir = "./bandcheck-results"
"#;

const EXAMPLE_TOPIC: &str = "Some people believe that unpaid community service should be a \
compulsory part of high school programmes. To what extent do you agree or disagree?\n";

const EXAMPLE_ESSAY: &str = "It is sometimes argued that high school students should be \
required to do unpaid work in their local communities. While such schemes have drawbacks, \
I believe the benefits for both students and society outweigh them.\n\n\
On the one hand, compulsory community service takes time away from academic study, and \
students who are forced to volunteer may resent the work and gain little from it. A \
teenager preparing for important examinations, for example, might see mandatory service \
as an unwelcome distraction rather than an opportunity.\n\n\
On the other hand, unpaid work exposes young people to responsibilities that classrooms \
cannot teach. Organising a charity event or helping elderly neighbours builds empathy, \
confidence and practical skills, and communities benefit directly from the extra help. \
In my view, these experiences justify making such programmes a standard part of secondary \
education.\n";
