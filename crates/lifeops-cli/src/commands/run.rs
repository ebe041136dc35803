use chrono::{Duration, Utc};
use clap::Args;

use lifeops_core::collaborators::mock::{MockCalendar, MockScene};
use lifeops_core::{Config, CoreError, EnergyHint, FocusNeuron, Hud, OpenLoopNeuron, Orchestrator};

#[derive(Args)]
pub struct RunArgs {
    /// Wall-clock run length in seconds
    #[arg(long, default_value = "60")]
    pub duration_secs: u64,

    /// Seconds between ticks (defaults to the configured value)
    #[arg(long)]
    pub tick_secs: Option<u64>,

    /// Auto-decline every suggestion instead of auto-accepting
    #[arg(long)]
    pub reject: bool,

    /// Seed energy hint: low | medium | high | unknown
    #[arg(long, default_value = "medium")]
    pub energy: String,

    /// Print the end-of-run summary as JSON instead of plain text
    #[arg(long)]
    pub json: bool,
}

/// Console HUD: prints suggestions and auto-answers prompts, standing
/// in for a real display/input device.
struct ConsoleHud {
    auto_accept: bool,
}

impl Hud for ConsoleHud {
    fn show(&self, text: &str) {
        println!("[HUD] {text}");
    }

    fn confirm(&self, prompt: &str) -> bool {
        let answer = if self.auto_accept { "YES" } else { "NO" };
        println!("[HUD PROMPT] {prompt} [auto-{answer}]");
        self.auto_accept
    }

    fn notify(&self, text: &str) {
        println!("[HUD NOTIFY] {text}");
    }
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let energy = args
        .energy
        .parse::<EnergyHint>()
        .map_err(CoreError::Custom)?;

    let hud = ConsoleHud {
        auto_accept: !args.reject,
    };
    let mut orch = Orchestrator::bootstrap(
        "local",
        &MockCalendar,
        &MockScene,
        Box::new(hud),
        Utc::now(),
    )?;
    orch.set_energy_hint(energy);
    orch.register(Box::new(FocusNeuron::new(config.focus.clone())));
    orch.register(Box::new(OpenLoopNeuron::new(config.loop_sweep.clone())));
    tracing::info!(energy = ?energy, auto_accept = !args.reject, "state seeded");

    println!("=== LifeOps test mode: ~{}s ===\n", args.duration_secs);
    let summary = orch.run_for(
        Duration::seconds(args.duration_secs as i64),
        std::time::Duration::from_secs(args.tick_secs.unwrap_or(config.tick_seconds)),
    );
    println!("\n=== LifeOps test mode completed ===");
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{summary}");
    }
    Ok(())
}
