use std::collections::BTreeSet;

use tracing::debug;

use super::{Discovery, DiscoveryError};
use crate::chain::Descriptor;
use crate::config::validation;

/// One handler registered into a namespace on its own
///
/// Submitted with [`chain_element!`](crate::chain_element).
#[derive(Debug)]
pub struct ElementRegistration {
    pub namespace: &'static str,
    pub element: ElementDecl,
}

/// A namespace declaring its complete handler list in one place
///
/// Submitted with [`chain_namespace!`](crate::chain_namespace). When a
/// namespace declaration exists, element registrations for the same
/// namespace are ignored.
#[derive(Debug)]
pub struct NamespaceRegistration {
    pub namespace: &'static str,
    pub elements: &'static [ElementDecl],
}

/// Static form of a [`Descriptor`]
#[derive(Debug, Clone, Copy)]
pub struct ElementDecl {
    pub type_id: &'static str,
    pub priority: i32,
    pub initializer: Option<&'static str>,
}

impl ElementDecl {
    pub const fn new(type_id: &'static str, priority: i32) -> Self {
        Self {
            type_id,
            priority,
            initializer: None,
        }
    }

    pub const fn with_initializer(mut self, initializer: &'static str) -> Self {
        self.initializer = Some(initializer);
        self
    }

    pub fn to_descriptor(&self) -> Descriptor {
        Descriptor {
            type_id: self.type_id.to_string(),
            priority: self.priority,
            initializer: self.initializer.map(str::to_string),
            options: serde_json::Value::Null,
        }
    }
}

inventory::collect!(ElementRegistration);
inventory::collect!(NamespaceRegistration);

/// Register a handler type into a namespace at link time
///
/// ```rust,ignore
/// corchain::chain_element!("payments", "card", priority = 10);
/// corchain::chain_element!("payments", "voucher", priority = 20, initializer = "from_env");
/// ```
#[macro_export]
macro_rules! chain_element {
    ($namespace:expr, $type_id:expr $(,)?) => {
        $crate::chain_element!($namespace, $type_id, priority = 0);
    };
    ($namespace:expr, $type_id:expr, priority = $priority:expr $(,)?) => {
        $crate::discovery::inventory::submit! {
            $crate::discovery::ElementRegistration {
                namespace: $namespace,
                element: $crate::discovery::ElementDecl::new($type_id, $priority),
            }
        }
    };
    (
        $namespace:expr,
        $type_id:expr,
        priority = $priority:expr,
        initializer = $initializer:expr $(,)?
    ) => {
        $crate::discovery::inventory::submit! {
            $crate::discovery::ElementRegistration {
                namespace: $namespace,
                element: $crate::discovery::ElementDecl::new($type_id, $priority)
                    .with_initializer($initializer),
            }
        }
    };
}

/// Declare the full handler list of a namespace at link time
///
/// Each entry is `(type_id, priority)` or `(type_id, priority, initializer)`.
///
/// ```rust,ignore
/// corchain::chain_namespace!("payments", [
///     ("card", 10),
///     ("voucher", 20, "from_env"),
/// ]);
/// ```
#[macro_export]
macro_rules! chain_namespace {
    ($namespace:expr, [ $( ($type_id:expr, $priority:expr $(, $initializer:expr)?) ),* $(,)? ]) => {
        $crate::discovery::inventory::submit! {
            $crate::discovery::NamespaceRegistration {
                namespace: $namespace,
                elements: &[
                    $(
                        $crate::discovery::ElementDecl::new($type_id, $priority)
                            $(.with_initializer($initializer))?
                    ),*
                ],
            }
        }
    };
}

/// Discovery over registrations collected at link time
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticDiscovery;

impl StaticDiscovery {
    pub fn new() -> Self {
        Self
    }
}

impl Discovery for StaticDiscovery {
    fn discover(&self, namespace: &str) -> Result<Vec<Descriptor>, DiscoveryError> {
        let mut declared = inventory::iter::<NamespaceRegistration>
            .into_iter()
            .filter(|registration| registration.namespace == namespace);

        if let Some(declaration) = declared.next() {
            if declared.next().is_some() {
                return Err(DiscoveryError::DuplicateNamespace(namespace.to_string()));
            }
            debug!(
                namespace,
                elements = declaration.elements.len(),
                "Using namespace declaration"
            );
            let descriptors: Vec<Descriptor> =
                declaration.elements.iter().map(ElementDecl::to_descriptor).collect();
            validation::validate_elements(namespace, &descriptors)?;
            return Ok(descriptors);
        }

        let mut elements: Vec<&ElementDecl> = inventory::iter::<ElementRegistration>
            .into_iter()
            .filter(|registration| registration.namespace == namespace)
            .map(|registration| &registration.element)
            .collect();

        if elements.is_empty() {
            return Err(DiscoveryError::NamespaceNotFound(namespace.to_string()));
        }

        // link order is unspecified; give element registrations a stable order
        elements.sort_by_key(|element| element.type_id);
        debug!(namespace, elements = elements.len(), "Collected element registrations");

        let descriptors: Vec<Descriptor> =
            elements.into_iter().map(ElementDecl::to_descriptor).collect();
        validation::validate_elements(namespace, &descriptors)?;
        Ok(descriptors)
    }

    fn namespaces(&self) -> Vec<String> {
        let declared = inventory::iter::<NamespaceRegistration>
            .into_iter()
            .map(|registration| registration.namespace);
        let elements = inventory::iter::<ElementRegistration>
            .into_iter()
            .map(|registration| registration.namespace);

        declared
            .chain(elements)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}
