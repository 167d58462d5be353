use colored::Colorize;
use cosmos_core::Scale;
use cosmos_core::guide::script;
use cosmos_core::timing::stage_duration;

pub fn execute(scale: Scale) {
    println!(
        "{} {}",
        scale.label().bold(),
        format!("({}s)", stage_duration(scale).as_secs()).dimmed()
    );
    println!();

    for (index, line) in script::guide_lines(scale).iter().enumerate() {
        println!("  {}  {}", format!("{}.", index + 1).dimmed(), line);
    }

    println!();
    println!("  {} {}", "→".cyan(), script::worry_reflection(scale).italic());
}
