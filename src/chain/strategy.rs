use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::descriptor::Descriptor;
use super::error::{BoxError, InstantiationError};
use crate::handlers::{BoxedHandler, Handler};

/// Zero-argument construction function
pub type Constructor<I, R> =
    Arc<dyn Fn() -> Result<BoxedHandler<I, R>, BoxError> + Send + Sync>;

/// Construction function that receives the descriptor being built
pub type Initializer<I, R> =
    Arc<dyn Fn(&Descriptor) -> Result<BoxedHandler<I, R>, BoxError> + Send + Sync>;

/// Named per-type accessor that yields the actual [`Initializer`]
pub type InitializerAccessor<I, R> =
    Arc<dyn Fn() -> Result<Initializer<I, R>, BoxError> + Send + Sync>;

/// Policy turning a descriptor into a live handler
pub trait InstantiationStrategy<I: ?Sized, R> {
    fn instantiate(
        &self,
        descriptor: &Descriptor,
    ) -> Result<BoxedHandler<I, R>, InstantiationError>;
}

impl<I: ?Sized, R, S: InstantiationStrategy<I, R> + ?Sized> InstantiationStrategy<I, R> for &S {
    fn instantiate(
        &self,
        descriptor: &Descriptor,
    ) -> Result<BoxedHandler<I, R>, InstantiationError> {
        (**self).instantiate(descriptor)
    }
}

struct TypeEntry<I: ?Sized, R> {
    constructor: Option<Constructor<I, R>>,
    initializers: BTreeMap<String, InitializerAccessor<I, R>>,
}

impl<I: ?Sized, R> Default for TypeEntry<I, R> {
    fn default() -> Self {
        Self {
            constructor: None,
            initializers: BTreeMap::new(),
        }
    }
}

/// Factory table mapping handler type ids to their construction functions
///
/// Stands in for runtime type lookup: every handler type a chain may contain
/// is registered here up front, with an optional zero-argument constructor
/// and any number of named initializer accessors.
pub struct HandlerFactory<I: ?Sized, R> {
    types: BTreeMap<String, TypeEntry<I, R>>,
}

impl<I: ?Sized + 'static, R: 'static> HandlerFactory<I, R> {
    pub fn new() -> Self {
        Self {
            types: BTreeMap::new(),
        }
    }

    /// Register `H` under `type_id`, constructed through `Default`
    pub fn register_default<H>(&mut self, type_id: impl Into<String>) -> &mut Self
    where
        H: Handler<I, R> + Default + 'static,
    {
        self.register_constructor(type_id, || Ok(Box::new(H::default()) as BoxedHandler<I, R>))
    }

    /// Register a fallible zero-argument constructor for `type_id`
    pub fn register_constructor<F>(
        &mut self,
        type_id: impl Into<String>,
        constructor: F,
    ) -> &mut Self
    where
        F: Fn() -> Result<BoxedHandler<I, R>, BoxError> + Send + Sync + 'static,
    {
        self.types.entry(type_id.into()).or_default().constructor = Some(Arc::new(constructor));
        self
    }

    /// Register a named initializer accessor for `type_id`
    ///
    /// The accessor is invoked at build time and must return the function
    /// that constructs the handler.
    pub fn register_initializer<F>(
        &mut self,
        type_id: impl Into<String>,
        name: impl Into<String>,
        accessor: F,
    ) -> &mut Self
    where
        F: Fn() -> Result<Initializer<I, R>, BoxError> + Send + Sync + 'static,
    {
        self.types
            .entry(type_id.into())
            .or_default()
            .initializers
            .insert(name.into(), Arc::new(accessor));
        self
    }

    pub fn contains(&self, type_id: &str) -> bool {
        self.types.contains_key(type_id)
    }

    pub fn type_ids(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    fn entry(&self, type_id: &str) -> Result<&TypeEntry<I, R>, InstantiationError> {
        self.types
            .get(type_id)
            .ok_or_else(|| InstantiationError::UnknownType(type_id.to_string()))
    }

    fn construct_default(&self, type_id: &str) -> Result<BoxedHandler<I, R>, InstantiationError> {
        let constructor = self
            .entry(type_id)?
            .constructor
            .as_ref()
            .ok_or_else(|| InstantiationError::NoDefaultConstructor(type_id.to_string()))?;

        constructor().map_err(|source| InstantiationError::construction(type_id, source))
    }

    fn resolve_initializer(
        &self,
        type_id: &str,
        name: &str,
    ) -> Result<Initializer<I, R>, InstantiationError> {
        let accessor = self.entry(type_id)?.initializers.get(name).ok_or_else(|| {
            InstantiationError::InitializerNotFound {
                type_id: type_id.to_string(),
                initializer: name.to_string(),
            }
        })?;

        accessor().map_err(|source| InstantiationError::Accessor {
            type_id: type_id.to_string(),
            initializer: name.to_string(),
            source,
        })
    }
}

impl<I: ?Sized + 'static, R: 'static> Default for HandlerFactory<I, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: ?Sized, R> fmt::Debug for HandlerFactory<I, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (type_id, entry) in &self.types {
            map.entry(
                type_id,
                &format_args!(
                    "constructor: {}, initializers: {:?}",
                    entry.constructor.is_some(),
                    entry.initializers.keys().collect::<Vec<_>>()
                ),
            );
        }
        map.finish()
    }
}

/// Build every handler through its zero-argument constructor
#[derive(Debug)]
pub struct DefaultConstruct<'a, I: ?Sized, R>(pub &'a HandlerFactory<I, R>);

impl<I: ?Sized + 'static, R: 'static> InstantiationStrategy<I, R> for DefaultConstruct<'_, I, R> {
    fn instantiate(
        &self,
        descriptor: &Descriptor,
    ) -> Result<BoxedHandler<I, R>, InstantiationError> {
        self.0.construct_default(&descriptor.type_id)
    }
}

/// Apply one caller-supplied initializer to every descriptor
pub struct GlobalInitializer<F>(pub F);

impl<I, R, F> InstantiationStrategy<I, R> for GlobalInitializer<F>
where
    I: ?Sized,
    F: Fn(&Descriptor) -> Result<BoxedHandler<I, R>, BoxError>,
{
    fn instantiate(
        &self,
        descriptor: &Descriptor,
    ) -> Result<BoxedHandler<I, R>, InstantiationError> {
        (self.0)(descriptor)
            .map_err(|source| InstantiationError::construction(&descriptor.type_id, source))
    }
}

impl<F> fmt::Debug for GlobalInitializer<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("GlobalInitializer")
    }
}

/// Use the initializer each descriptor names, or the default constructor
#[derive(Debug)]
pub struct PerTypeInitializer<'a, I: ?Sized, R>(pub &'a HandlerFactory<I, R>);

impl<I: ?Sized + 'static, R: 'static> InstantiationStrategy<I, R> for PerTypeInitializer<'_, I, R> {
    fn instantiate(
        &self,
        descriptor: &Descriptor,
    ) -> Result<BoxedHandler<I, R>, InstantiationError> {
        let type_id = descriptor.type_id.as_str();
        let Some(name) = descriptor.initializer() else {
            return self.0.construct_default(type_id);
        };

        let initializer = self.0.resolve_initializer(type_id, name)?;
        initializer(descriptor).map_err(|source| InstantiationError::construction(type_id, source))
    }
}

/// A type id paired with the initializer that builds it
pub struct Binding<I: ?Sized, R> {
    pub type_id: String,
    pub initializer: Initializer<I, R>,
}

impl<I: ?Sized, R> Binding<I, R> {
    pub fn new<F>(type_id: impl Into<String>, initializer: F) -> Self
    where
        F: Fn(&Descriptor) -> Result<BoxedHandler<I, R>, BoxError> + Send + Sync + 'static,
    {
        Self {
            type_id: type_id.into(),
            initializer: Arc::new(initializer),
        }
    }
}

impl<I: ?Sized, R> fmt::Debug for Binding<I, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding").field("type_id", &self.type_id).finish_non_exhaustive()
    }
}
