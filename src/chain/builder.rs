use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::descriptor::Descriptor;
use super::engine::{Chain, ChainAssembly};
use super::error::{BuildError, InstantiationError};
use super::strategy::{Binding, HandlerFactory, InstantiationStrategy, PerTypeInitializer};
use crate::discovery::Discovery;
use crate::handlers::BoxedHandler;
use crate::observability::ChainMetrics;

/// Ordering among descriptors sharing a priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Keep the order in which descriptors were supplied
    #[default]
    DiscoveryOrder,
    /// Order lexicographically by type id
    TypeId,
}

/// What a build over zero handlers yields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyChainPolicy {
    /// `Ok(None)`
    #[default]
    Allow,
    /// `Err(BuildError::EmptyChain)`
    Reject,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
    pub tie_break: TieBreak,
    pub empty_chain: EmptyChainPolicy,
}

/// Entry of the priority buffer; the heap pops the smallest key first
struct Pending<'a> {
    priority: i32,
    sequence: usize,
    tie_break: TieBreak,
    descriptor: &'a Descriptor,
}

impl Pending<'_> {
    fn key(&self) -> (i32, &str, usize) {
        match self.tie_break {
            TieBreak::DiscoveryOrder => (self.priority, "", self.sequence),
            TieBreak::TypeId => (self.priority, self.descriptor.type_id.as_str(), self.sequence),
        }
    }
}

impl PartialEq for Pending<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Pending<'_> {}

impl PartialOrd for Pending<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// Builds chains from descriptors, type lists or explicit bindings
///
/// Every entry point is all-or-nothing: handlers are instantiated into a
/// staging buffer and the chain is only returned once every one of them
/// succeeded. A failed build returns the error and drops whatever had been
/// created.
#[derive(Debug, Clone, Default)]
pub struct ChainBuilder {
    options: BuildOptions,
    metrics: Option<Arc<ChainMetrics>>,
}

impl ChainBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: BuildOptions) -> Self {
        Self {
            options,
            metrics: None,
        }
    }

    pub fn tie_break(mut self, tie_break: TieBreak) -> Self {
        self.options.tie_break = tie_break;
        self
    }

    pub fn empty_chain(mut self, policy: EmptyChainPolicy) -> Self {
        self.options.empty_chain = policy;
        self
    }

    /// Record build outcomes into `metrics`
    pub fn with_metrics(mut self, metrics: Arc<ChainMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn options(&self) -> BuildOptions {
        self.options
    }

    /// Link the given types in exactly the given order
    ///
    /// No priority is consulted. Each type is instantiated through
    /// `strategy` with a default descriptor.
    pub fn build_from_ordered_list<I, R, T, S>(
        &self,
        type_ids: &[T],
        strategy: &S,
    ) -> Result<Option<Chain<I, R>>, BuildError>
    where
        I: ?Sized,
        T: AsRef<str>,
        S: InstantiationStrategy<I, R> + ?Sized,
    {
        let descriptors: Vec<Descriptor> =
            type_ids.iter().map(|t| Descriptor::new(t.as_ref())).collect();

        self.finish(
            None,
            self.link(descriptors.iter().map(|d| (d, ())), |descriptor, ()| {
                strategy.instantiate(descriptor)
            }),
        )
    }

    /// Order descriptors by ascending priority and build them through their
    /// own initializers, falling back to `Default` construction
    pub fn build_from_descriptors<I, R>(
        &self,
        descriptors: Vec<Descriptor>,
        factory: &HandlerFactory<I, R>,
    ) -> Result<Option<Chain<I, R>>, BuildError>
    where
        I: ?Sized + 'static,
        R: 'static,
    {
        self.build_from_descriptors_with(descriptors, &PerTypeInitializer(factory))
    }

    /// Priority-ordered build with a caller-chosen strategy
    pub fn build_from_descriptors_with<I, R, S>(
        &self,
        descriptors: Vec<Descriptor>,
        strategy: &S,
    ) -> Result<Option<Chain<I, R>>, BuildError>
    where
        I: ?Sized,
        S: InstantiationStrategy<I, R> + ?Sized,
    {
        self.build_prioritized(None, &descriptors, strategy)
    }

    /// Link one handler per binding, in iteration order, each built by its
    /// own initializer
    ///
    /// Each type id may be bound once; a repeated one fails the build before
    /// anything is instantiated.
    pub fn build_from_descriptor_map<I, R, B>(
        &self,
        bindings: B,
    ) -> Result<Option<Chain<I, R>>, BuildError>
    where
        I: ?Sized,
        B: IntoIterator<Item = Binding<I, R>>,
    {
        let bindings: Vec<(Descriptor, Binding<I, R>)> = bindings
            .into_iter()
            .map(|binding| (Descriptor::new(binding.type_id.as_str()), binding))
            .collect();

        let mut seen = HashSet::with_capacity(bindings.len());
        for (descriptor, _) in &bindings {
            if !seen.insert(descriptor.type_id.as_str()) {
                warn!(type_id = %descriptor.type_id, "Handler type bound more than once");
                self.record_failure();
                return Err(BuildError::DuplicateType {
                    type_id: descriptor.type_id.clone(),
                });
            }
        }

        let linked = self.link(
            bindings.iter().map(|(descriptor, binding)| (descriptor, binding)),
            |descriptor, binding| {
                (binding.initializer)(descriptor)
                    .map_err(|source| InstantiationError::construction(&descriptor.type_id, source))
            },
        );

        self.finish(None, linked)
    }

    /// Discover the descriptors of `namespace` and build them by priority
    pub fn build_from_namespace<I, R, D>(
        &self,
        discovery: &D,
        namespace: &str,
        factory: &HandlerFactory<I, R>,
    ) -> Result<Option<Chain<I, R>>, BuildError>
    where
        I: ?Sized + 'static,
        R: 'static,
        D: Discovery + ?Sized,
    {
        self.build_from_namespace_with(discovery, namespace, &PerTypeInitializer(factory))
    }

    /// Priority-ordered namespace build with a caller-chosen strategy
    pub fn build_from_namespace_with<I, R, D, S>(
        &self,
        discovery: &D,
        namespace: &str,
        strategy: &S,
    ) -> Result<Option<Chain<I, R>>, BuildError>
    where
        I: ?Sized,
        D: Discovery + ?Sized,
        S: InstantiationStrategy<I, R> + ?Sized,
    {
        let descriptors = self.discover(discovery, namespace)?;
        self.build_prioritized(Some(namespace), &descriptors, strategy)
    }

    /// Link the handlers of `namespace` in the order discovery returned them
    ///
    /// Priorities are ignored. Each descriptor is still handed to `strategy`
    /// whole, so initializers see its options.
    pub fn build_from_namespace_in_discovery_order<I, R, D, S>(
        &self,
        discovery: &D,
        namespace: &str,
        strategy: &S,
    ) -> Result<Option<Chain<I, R>>, BuildError>
    where
        I: ?Sized,
        D: Discovery + ?Sized,
        S: InstantiationStrategy<I, R> + ?Sized,
    {
        let descriptors = self.discover(discovery, namespace)?;
        self.finish(
            Some(namespace),
            self.link(descriptors.iter().map(|d| (d, ())), |descriptor, ()| {
                strategy.instantiate(descriptor)
            }),
        )
    }

    /// Descriptors in the order a priority build would link them
    pub fn order<'a>(&self, descriptors: &'a [Descriptor]) -> Vec<&'a Descriptor> {
        let mut heap: BinaryHeap<Reverse<Pending<'a>>> = descriptors
            .iter()
            .enumerate()
            .map(|(sequence, descriptor)| {
                Reverse(Pending {
                    priority: descriptor.priority,
                    sequence,
                    tie_break: self.options.tie_break,
                    descriptor,
                })
            })
            .collect();

        let mut ordered = Vec::with_capacity(heap.len());
        while let Some(Reverse(pending)) = heap.pop() {
            ordered.push(pending.descriptor);
        }
        ordered
    }

    fn discover<D>(&self, discovery: &D, namespace: &str) -> Result<Vec<Descriptor>, BuildError>
    where
        D: Discovery + ?Sized,
    {
        match discovery.discover(namespace) {
            Ok(descriptors) => {
                debug!(namespace, descriptors = descriptors.len(), "Discovered chain descriptors");
                Ok(descriptors)
            }
            Err(err) => {
                warn!(namespace, error = %err, "Chain discovery failed");
                self.record_failure();
                Err(err.into())
            }
        }
    }

    fn build_prioritized<I, R, S>(
        &self,
        namespace: Option<&str>,
        descriptors: &[Descriptor],
        strategy: &S,
    ) -> Result<Option<Chain<I, R>>, BuildError>
    where
        I: ?Sized,
        S: InstantiationStrategy<I, R> + ?Sized,
    {
        let ordered = self.order(descriptors);
        self.finish(
            namespace,
            self.link(ordered.into_iter().map(|d| (d, ())), |descriptor, ()| {
                strategy.instantiate(descriptor)
            }),
        )
    }

    /// Instantiate in order into a fresh assembly; the first failure aborts
    ///
    /// Each item pairs a descriptor with whatever extra input `instantiate`
    /// needs for it.
    fn link<'d, I, R, T, It, F>(
        &self,
        items: It,
        mut instantiate: F,
    ) -> Result<ChainAssembly<I, R>, BuildError>
    where
        I: ?Sized,
        It: ExactSizeIterator<Item = (&'d Descriptor, T)>,
        F: FnMut(&Descriptor, T) -> Result<BoxedHandler<I, R>, InstantiationError>,
    {
        let mut assembly = ChainAssembly::with_capacity(items.len());

        for (position, (descriptor, extra)) in items.enumerate() {
            debug!(
                position,
                type_id = %descriptor.type_id,
                priority = descriptor.priority,
                initializer = descriptor.initializer().unwrap_or(""),
                "Instantiating chain element"
            );

            let handler = instantiate(descriptor, extra).map_err(|source| {
                warn!(
                    position,
                    type_id = %descriptor.type_id,
                    error = %source,
                    "Chain element failed to instantiate"
                );
                BuildError::Instantiation {
                    position,
                    type_id: descriptor.type_id.clone(),
                    source,
                }
            })?;
            assembly.set_next(descriptor.type_id.as_str(), handler);
        }

        Ok(assembly)
    }

    fn finish<I, R>(
        &self,
        namespace: Option<&str>,
        linked: Result<ChainAssembly<I, R>, BuildError>,
    ) -> Result<Option<Chain<I, R>>, BuildError>
    where
        I: ?Sized,
    {
        let assembly = match linked {
            Ok(assembly) => assembly,
            Err(err) => {
                self.record_failure();
                return Err(err);
            }
        };

        match assembly.publish() {
            Some(chain) => {
                info!(
                    namespace = namespace.unwrap_or(""),
                    handlers = ?chain.type_ids(),
                    "Chain built"
                );
                if let Some(metrics) = &self.metrics {
                    metrics.chain_built();
                }
                Ok(Some(chain))
            }
            None if self.options.empty_chain == EmptyChainPolicy::Reject => {
                self.record_failure();
                Err(BuildError::EmptyChain {
                    namespace: namespace.map(str::to_string),
                })
            }
            None => {
                warn!(namespace = namespace.unwrap_or(""), "No handlers found, no chain built");
                Ok(None)
            }
        }
    }

    fn record_failure(&self) {
        if let Some(metrics) = &self.metrics {
            metrics.build_failed();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::strategy::GlobalInitializer;
    use crate::chain::{BoxError, DefaultConstruct};
    use crate::discovery::{DiscoveryError, RegistryDiscovery};
    use crate::handlers::FnHandler;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

    /// Handler that claims inputs equal to its own type id
    fn named(type_id: &str) -> BoxedHandler<str, String> {
        let owned = type_id.to_string();
        let label = type_id.to_string();
        Box::new(FnHandler::new(
            move |input: &str| input == owned,
            move |input: &str| Some(format!("{label} handled {input}")),
        ))
    }

    fn named_init(descriptor: &Descriptor) -> Result<BoxedHandler<str, String>, BoxError> {
        Ok(named(&descriptor.type_id))
    }

    fn named_binding(type_id: &str) -> Binding<str, String> {
        Binding::new(type_id, named_init)
    }

    fn descriptors(items: &[(&str, i32)]) -> Vec<Descriptor> {
        items
            .iter()
            .map(|(type_id, priority)| Descriptor::new(*type_id).with_priority(*priority))
            .collect()
    }

    fn routes() -> RegistryDiscovery {
        let mut discovery = RegistryDiscovery::new();
        for descriptor in descriptors(&[("c", 0), ("a", -5), ("b", 3)]) {
            discovery.declare("routes", descriptor);
        }
        discovery
    }

    #[test]
    fn test_priority_order_ascending() {
        let chain = ChainBuilder::new()
            .build_from_descriptors_with(
                descriptors(&[("A", 5), ("B", 1), ("C", 3)]),
                &GlobalInitializer(named_init),
            )
            .unwrap()
            .unwrap();

        assert_eq!(chain.type_ids(), vec!["B", "C", "A"]);
        assert_eq!(chain.process("C").as_deref(), Some("C handled C"));
        assert_eq!(chain.process("D"), None);
    }

    #[test]
    fn test_negative_priorities_come_first() {
        let chain = ChainBuilder::new()
            .build_from_descriptors_with(
                descriptors(&[("zero", 0), ("neg", -10), ("pos", 10)]),
                &GlobalInitializer(named_init),
            )
            .unwrap()
            .unwrap();

        assert_eq!(chain.type_ids(), vec!["neg", "zero", "pos"]);
    }

    #[test]
    fn test_ties_keep_discovery_order() {
        let input = descriptors(&[("x", 1), ("b", 0), ("a", 1), ("c", 0), ("m", 1)]);
        let chain = ChainBuilder::new()
            .build_from_descriptors_with(input, &GlobalInitializer(named_init))
            .unwrap()
            .unwrap();

        assert_eq!(chain.type_ids(), vec!["b", "c", "x", "a", "m"]);
    }

    #[test]
    fn test_ties_by_type_id() {
        let input = descriptors(&[("x", 1), ("b", 0), ("a", 1), ("c", 0), ("m", 1)]);
        let chain = ChainBuilder::new()
            .tie_break(TieBreak::TypeId)
            .build_from_descriptors_with(input, &GlobalInitializer(named_init))
            .unwrap()
            .unwrap();

        assert_eq!(chain.type_ids(), vec!["b", "c", "a", "m", "x"]);
    }

    #[test]
    fn test_ordered_list_ignores_priority() {
        let chain = ChainBuilder::new()
            .build_from_ordered_list(&["C", "A", "B"], &GlobalInitializer(named_init))
            .unwrap()
            .unwrap();

        assert_eq!(chain.type_ids(), vec!["C", "A", "B"]);
    }

    #[test]
    fn test_empty_inputs_allowed_by_default() {
        let builder = ChainBuilder::new();
        let strategy = GlobalInitializer(named_init);

        assert!(builder.build_from_descriptors_with(vec![], &strategy).unwrap().is_none());
        let no_types: [&str; 0] = [];
        assert!(builder.build_from_ordered_list(&no_types, &strategy).unwrap().is_none());
        let no_bindings: Vec<Binding<str, String>> = vec![];
        assert!(builder.build_from_descriptor_map(no_bindings).unwrap().is_none());
    }

    #[test]
    fn test_empty_inputs_rejected_on_request() {
        let result = ChainBuilder::new()
            .empty_chain(EmptyChainPolicy::Reject)
            .build_from_descriptors_with(vec![], &GlobalInitializer(named_init));

        assert!(matches!(result, Err(BuildError::EmptyChain { namespace: None })));
    }

    #[test]
    fn test_failure_aborts_whole_build() {
        let created = Mutex::new(Vec::new());
        let strategy = GlobalInitializer(
            |descriptor: &Descriptor| -> Result<BoxedHandler<str, String>, BoxError> {
                if descriptor.type_id == "broken" {
                    return Err("constructor panicked politely".into());
                }
                created.lock().unwrap().push(descriptor.type_id.clone());
                Ok(named(&descriptor.type_id))
            },
        );

        let result = ChainBuilder::new().build_from_descriptors_with(
            descriptors(&[("first", 0), ("second", 1), ("broken", 2)]),
            &strategy,
        );

        let err = result.err().unwrap();
        assert!(matches!(
            err,
            BuildError::Instantiation { position: 2, ref type_id, .. } if type_id == "broken"
        ));
        assert_eq!(*created.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn test_descriptor_map_keeps_binding_order() {
        let bindings = vec![
            named_binding("beta"),
            Binding::new(
                "alpha",
                |_: &Descriptor| -> Result<BoxedHandler<str, String>, BoxError> {
                    Ok(Box::new(FnHandler::new(
                        |_: &str| true,
                        |_: &str| Some("alpha".to_string()),
                    )))
                },
            ),
        ];

        let chain = ChainBuilder::new()
            .build_from_descriptor_map(bindings)
            .unwrap()
            .unwrap();

        assert_eq!(chain.type_ids(), vec!["beta", "alpha"]);
        assert_eq!(chain.process("beta").as_deref(), Some("beta handled beta"));
        assert_eq!(chain.process("other").as_deref(), Some("alpha"));
    }

    #[test]
    fn test_descriptor_map_failure() {
        let bindings = vec![
            named_binding("ok"),
            Binding::new(
                "bad",
                |_: &Descriptor| -> Result<BoxedHandler<str, String>, BoxError> {
                    Err("nope".into())
                },
            ),
        ];

        let err = ChainBuilder::new()
            .build_from_descriptor_map(bindings)
            .err()
            .unwrap();
        assert!(matches!(
            err.instantiation(),
            Some(InstantiationError::Construction { type_id, .. }) if type_id == "bad"
        ));
    }

    #[test]
    fn test_descriptor_map_rejects_repeated_type() {
        let built = Arc::new(AtomicUsize::new(0));
        let counting = |type_id: &str| {
            let built = built.clone();
            Binding::new(
                type_id,
                move |descriptor: &Descriptor| -> Result<BoxedHandler<str, String>, BoxError> {
                    built.fetch_add(1, AtomicOrdering::SeqCst);
                    Ok(named(&descriptor.type_id))
                },
            )
        };
        let metrics = Arc::new(ChainMetrics::new());

        let err = ChainBuilder::new()
            .with_metrics(metrics.clone())
            .build_from_descriptor_map(vec![counting("x"), counting("y"), counting("x")])
            .err()
            .unwrap();

        assert!(matches!(err, BuildError::DuplicateType { ref type_id } if type_id == "x"));
        // rejected before any initializer ran
        assert_eq!(built.load(AtomicOrdering::SeqCst), 0);
        assert_eq!(metrics.snapshot().builds_failed, 1);
        assert_eq!(metrics.snapshot().chains_built, 0);
    }

    #[derive(Default)]
    struct Always;

    impl crate::handlers::Handler<str, String> for Always {
        fn is_responsible(&self, _: &str) -> bool {
            true
        }

        fn execute(&self, input: &str) -> Option<String> {
            Some(format!("always {input}"))
        }
    }

    #[test]
    fn test_build_from_namespace() {
        let mut discovery = RegistryDiscovery::new();
        discovery
            .declare("routes", Descriptor::new("always").with_priority(9))
            .declare("routes", Descriptor::new("other"));

        let mut factory: HandlerFactory<str, String> = HandlerFactory::new();
        factory.register_default::<Always>("always");

        // "other" is unknown to the factory
        let err = ChainBuilder::new()
            .build_from_namespace(&discovery, "routes", &factory)
            .err()
            .unwrap();
        assert!(matches!(
            err.instantiation(),
            Some(InstantiationError::UnknownType(t)) if t == "other"
        ));

        factory.register_constructor("other", || Ok(named("other")));
        let chain = ChainBuilder::new()
            .build_from_namespace(&discovery, "routes", &factory)
            .unwrap()
            .unwrap();
        assert_eq!(chain.type_ids(), vec!["other", "always"]);
        assert_eq!(chain.process("zzz").as_deref(), Some("always zzz"));
    }

    #[test]
    fn test_namespace_with_global_initializer() {
        let chain = ChainBuilder::new()
            .build_from_namespace_with(&routes(), "routes", &GlobalInitializer(named_init))
            .unwrap()
            .unwrap();

        assert_eq!(chain.type_ids(), vec!["a", "c", "b"]);
        assert_eq!(chain.process("b").as_deref(), Some("b handled b"));
    }

    #[test]
    fn test_namespace_in_discovery_order() {
        let builder = ChainBuilder::new();

        let chain = builder
            .build_from_namespace_in_discovery_order(
                &routes(),
                "routes",
                &GlobalInitializer(named_init),
            )
            .unwrap()
            .unwrap();
        assert_eq!(chain.type_ids(), vec!["c", "a", "b"]);

        let mut factory: HandlerFactory<str, String> = HandlerFactory::new();
        for type_id in ["a", "b", "c"] {
            factory.register_constructor(type_id, move || Ok(named(type_id)));
        }
        let chain = builder
            .build_from_namespace_in_discovery_order(
                &routes(),
                "routes",
                &DefaultConstruct(&factory),
            )
            .unwrap()
            .unwrap();
        assert_eq!(chain.type_ids(), vec!["c", "a", "b"]);
        assert_eq!(chain.process("a").as_deref(), Some("a handled a"));
    }

    #[test]
    fn test_namespace_in_discovery_order_empty() {
        let mut discovery = RegistryDiscovery::new();
        discovery.declare_namespace("quiet");

        let allowed = ChainBuilder::new().build_from_namespace_in_discovery_order(
            &discovery,
            "quiet",
            &GlobalInitializer(named_init),
        );
        assert!(allowed.unwrap().is_none());

        let rejected = ChainBuilder::new()
            .empty_chain(EmptyChainPolicy::Reject)
            .build_from_namespace_in_discovery_order(
                &discovery,
                "quiet",
                &GlobalInitializer(named_init),
            );
        assert!(matches!(
            rejected,
            Err(BuildError::EmptyChain { namespace: Some(ref ns) }) if ns == "quiet"
        ));
    }

    #[test]
    fn test_build_from_unknown_namespace() {
        let discovery = RegistryDiscovery::new();
        let factory: HandlerFactory<str, String> = HandlerFactory::new();
        let metrics = Arc::new(ChainMetrics::new());
        let builder = ChainBuilder::new().with_metrics(metrics.clone());

        let err = builder
            .build_from_namespace(&discovery, "missing", &factory)
            .err()
            .unwrap();
        assert!(matches!(err, BuildError::Discovery(DiscoveryError::NamespaceNotFound(_))));

        let err = builder
            .build_from_namespace_in_discovery_order(
                &discovery,
                "missing",
                &DefaultConstruct(&factory),
            )
            .err()
            .unwrap();
        assert!(matches!(err, BuildError::Discovery(DiscoveryError::NamespaceNotFound(_))));

        assert_eq!(metrics.snapshot().builds_failed, 2);
    }

    #[test]
    fn test_metrics_count_builds() {
        let metrics = Arc::new(ChainMetrics::new());
        let mut factory: HandlerFactory<str, String> = HandlerFactory::new();
        factory.register_default::<Always>("always");
        let builder = ChainBuilder::new().with_metrics(metrics.clone());

        builder
            .build_from_ordered_list(&["always"], &DefaultConstruct(&factory))
            .unwrap();
        builder
            .build_from_ordered_list(&["missing"], &DefaultConstruct(&factory))
            .err()
            .unwrap();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.chains_built, 1);
        assert_eq!(snapshot.builds_failed, 1);
    }
}
