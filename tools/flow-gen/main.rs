use clap::Parser;
use flowpath::document::FlowDocument;
use rand::Rng;
use rand::rngs::ThreadRng;
use rand::seq::IndexedRandom;
use serde_json::{Value, json};
use std::fs;

/// A CLI tool to generate random route documents for stress-testing flowpath
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_route.json")]
    output: String,

    /// How deeply container blocks may nest
    #[arg(long, default_value_t = 3)]
    depth: usize,

    /// The maximum number of steps in each steps array
    #[arg(long, default_value_t = 4)]
    width: usize,

    /// The maximum number of `when` clauses per `choice`
    #[arg(long, default_value_t = 3)]
    branches: usize,
}

const LEAVES: &[&str] = &["log", "setBody", "setHeader", "to", "marshal", "delay"];
const CONTAINERS: &[&str] = &["choice", "doTry", "split", "filter", "multicast"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if cli.width == 0 || cli.branches == 0 {
        eprintln!("Error: --width and --branches must be at least 1");
        std::process::exit(1);
    }

    println!(
        "Generating route (depth {}, up to {} steps per array, up to {} branches)...",
        cli.depth, cli.width, cli.branches
    );

    let mut generator = Generator {
        rng: &mut rng,
        width: cli.width,
        branches: cli.branches,
        steps: 0,
    };
    let steps = generator.steps(cli.depth);
    let step_count = generator.steps;

    let mut document = FlowDocument::from_value(json!({
        "route": {
            "from": {
                "uri": "timer:generated",
                "parameters": { "period": rng.random_range(100..10_000) },
                "steps": steps,
            }
        }
    }))?;
    let id = document
        .ensure_id(&mut rng)
        .ok_or("generated route has no object definition")?;

    let json_output = serde_json::to_string_pretty(document.value())?;
    fs::write(&cli.output, json_output)?;

    println!(
        "Successfully generated route '{}' with {} step(s) and saved it to '{}'",
        id, step_count, cli.output
    );

    Ok(())
}

struct Generator<'a> {
    rng: &'a mut ThreadRng,
    width: usize,
    branches: usize,
    steps: usize,
}

impl Generator<'_> {
    /// A steps array; containers only appear while `depth` remains.
    fn steps(&mut self, depth: usize) -> Value {
        let count = self.rng.random_range(1..=self.width);
        let steps = (0..count)
            .map(|_| {
                self.steps += 1;
                if depth > 0 && self.rng.random_bool(0.4) {
                    self.container(depth - 1)
                } else {
                    self.leaf()
                }
            })
            .collect();
        Value::Array(steps)
    }

    fn leaf(&mut self) -> Value {
        let name = LEAVES.choose(self.rng).copied().unwrap_or("log");
        let n = self.rng.random_range(0..1000);
        match name {
            "log" => json!({ "log": { "message": format!("step {} ${{body}}", n) } }),
            "setBody" => json!({ "setBody": { "simple": format!("body-{}", n) } }),
            "setHeader" => json!({ "setHeader": { "name": format!("h{}", n), "constant": "x" } }),
            "to" => json!({ "to": { "uri": format!("direct:target-{}", n) } }),
            "marshal" => json!({ "marshal": { "json": {} } }),
            _ => json!({ "delay": { "constant": n } }),
        }
    }

    fn container(&mut self, depth: usize) -> Value {
        let name = CONTAINERS.choose(self.rng).copied().unwrap_or("choice");
        match name {
            "choice" => {
                let count = self.rng.random_range(1..=self.branches);
                let whens: Vec<Value> = (0..count)
                    .map(|i| {
                        json!({
                            "simple": format!("${{header.branch}} == {}", i),
                            "steps": self.steps(depth),
                        })
                    })
                    .collect();
                let mut choice = json!({ "when": whens });
                if self.rng.random_bool(0.5) {
                    choice["otherwise"] = json!({ "steps": self.steps(depth) });
                }
                json!({ "choice": choice })
            }
            "doTry" => json!({
                "doTry": {
                    "steps": self.steps(depth),
                    "doCatch": [{
                        "exception": ["java.lang.Exception"],
                        "steps": self.steps(depth),
                    }],
                    "doFinally": { "steps": self.steps(depth) },
                }
            }),
            "split" => json!({
                "split": { "simple": "${body}", "steps": self.steps(depth) }
            }),
            "filter" => json!({
                "filter": { "simple": "${header.keep}", "steps": self.steps(depth) }
            }),
            _ => json!({
                "multicast": { "parallelProcessing": true, "steps": self.steps(depth) }
            }),
        }
    }
}
