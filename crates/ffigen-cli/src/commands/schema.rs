use anyhow::anyhow;
use ffigen_config::FfigenConfig;
use ffigen_schema::SchemaRegistry;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output;

/// Handle `ffigen schema`.
pub fn handle(args: &SchemaArgs, config: &FfigenConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let registry = SchemaRegistry::new();
    let schema = lookup(&registry, &args.type_name)?;
    output::output(schema, flags.format_or(config.output.pretty))
}

fn lookup<'a>(registry: &'a SchemaRegistry, name: &str) -> anyhow::Result<&'a serde_json::Value> {
    registry.get(name).ok_or_else(|| {
        anyhow!(
            "unknown schema '{name}' (available: {})",
            registry.list().join(", ")
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_schema_requires_anonymous_key() {
        let registry = SchemaRegistry::new();
        let schema = lookup(&registry, "document").expect("document schema");
        assert_eq!(schema["required"], serde_json::json!([""]));
    }

    #[test]
    fn unknown_schema_lists_available_names() {
        let registry = SchemaRegistry::new();
        let error = lookup(&registry, "widget").expect_err("unknown schema");
        let message = error.to_string();
        assert!(message.contains("widget"));
        assert!(message.contains("type_node"));
    }
}
