use std::sync::Arc;

use corchain::chain::ChainBuilder;
use corchain::config::{NamespaceSource, Settings};
use corchain::handlers::builtin_factory;
use corchain::observability::ChainMetrics;

type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub fn describe(settings: &Settings, namespace: &str) -> Result<(), AnyError> {
    let descriptors = settings.discovery_for(namespace).discover(namespace)?;
    let builder = settings.chain_builder();

    println!("{namespace}");
    if descriptors.is_empty() {
        println!("  (no handlers)");
        return Ok(());
    }

    for (position, descriptor) in builder.order(&descriptors).into_iter().enumerate() {
        match descriptor.initializer() {
            Some(initializer) => println!(
                "  {position:>3}  {:<16} priority={:<11} initializer={initializer}",
                descriptor.type_id, descriptor.priority
            ),
            None => println!(
                "  {position:>3}  {:<16} priority={}",
                descriptor.type_id, descriptor.priority
            ),
        }
    }

    Ok(())
}

pub fn run(settings: &Settings, namespace: &str, inputs: &[String]) -> Result<(), AnyError> {
    let metrics = Arc::new(ChainMetrics::new());
    let builder: ChainBuilder = settings.chain_builder().with_metrics(metrics.clone());
    let discovery = settings.discovery_for(namespace);

    let Some(chain) = builder.build_from_namespace(&discovery, namespace, &builtin_factory())?
    else {
        println!("namespace '{namespace}' has no handlers; nothing processed");
        return Ok(());
    };

    for input in inputs {
        let traversal = chain.process_traced(input.as_str());
        metrics.input_processed(traversal.is_handled());

        match (traversal.handled_by, traversal.result) {
            (Some((_, type_id)), Some(result)) => println!("{input:?}\t{type_id}\t{result}"),
            (Some((_, type_id)), None) => println!("{input:?}\t{type_id}\t(no result)"),
            (None, _) => println!("{input:?}\t-\tunhandled"),
        }
    }

    let snapshot = metrics.snapshot();
    println!(
        "handled={} unhandled={}",
        snapshot.inputs_handled, snapshot.inputs_unhandled
    );

    Ok(())
}

pub fn namespaces(settings: &Settings) {
    for (namespace, source) in settings.known_namespaces() {
        let source = match source {
            NamespaceSource::Config => "config",
            NamespaceSource::Static => "static",
        };
        println!("{namespace}\t({source})");
    }
}
