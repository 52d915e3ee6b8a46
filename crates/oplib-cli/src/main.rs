use clap::Parser;
use oplib_loader::LoadSpec;
use oplib_sdk::{global_op_registry, Value};

#[derive(Parser)]
#[command(name = "oplib")]
#[command(about = "Oplib - load operator libraries and invoke their ops")]
struct Cli {
    #[arg(short, long)]
    config: String,

    /// Print every registered op signature after the run
    #[arg(long)]
    list: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    // Load YAML spec
    let spec: LoadSpec = serde_yaml::from_str(&std::fs::read_to_string(&cli.config)?)?;

    let summary = oplib_loader::run_spec(&spec)?;

    for library in &summary.libraries {
        println!(
            "loaded {} [{}]",
            library.path().display(),
            library.op_names().join(", ")
        );
    }

    for call in &summary.calls {
        for (name, value) in &call.outputs {
            match value {
                Value::Scalar(s) => println!("{}.{} = {}", call.op, name, s),
                Value::Vector(items) => {
                    println!("{}.{} = [{}]", call.op, name, items.join(", "))
                }
            }
        }
    }

    if cli.list {
        let registry = global_op_registry().read();
        for name in registry.op_names() {
            if let Some(def) = registry.lookup(&name) {
                println!("{}", def.signature());
            }
        }
    }

    println!("✓ Run completed successfully");
    Ok(())
}
