use crate::{AsValue, Error, Kind, Options, Record, Result, Tag, Value};
use std::{
    any::{self, Any, TypeId},
    cell::Cell,
    collections::HashMap,
    fmt::{self, Debug},
    marker::PhantomData,
    panic::{self, AssertUnwindSafe},
    sync::{LazyLock, Once, PoisonError, RwLock},
};

/// Static description of one bound field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// Field path from the record root, nested fields joined by `.`.
    pub path: String,
    pub tag: Tag,
    pub kind: Kind,
}

impl Binding {
    pub fn column(&self) -> &str {
        self.tag.column()
    }
}

type Assign<R> = Box<dyn Fn(&mut R, &Value, &Options) -> anyhow::Result<()> + Send + Sync>;

/// A [`Binding`] together with the code assigning a column value to the field of `R`.
pub struct FieldBinding<R> {
    binding: Binding,
    assign: Assign<R>,
}

impl<R: 'static> FieldBinding<R> {
    pub fn new<T: AsValue + 'static>(
        path: impl Into<String>,
        tag: &str,
        access: fn(&mut R) -> &mut T,
    ) -> Self {
        Self {
            binding: Binding {
                path: path.into(),
                tag: Tag::parse(tag),
                kind: T::kind(),
            },
            assign: Box::new(move |target, value, options| {
                *access(target) = T::try_from_value(value, options)?;
                Ok(())
            }),
        }
    }

    pub fn binding(&self) -> &Binding {
        &self.binding
    }

    pub fn column(&self) -> &str {
        self.binding.column()
    }

    /// Coerce `value` and assign it to the field of `target`.
    ///
    /// Errors and panics raised while doing so do not escape, they are returned as
    /// [`Error::FieldMapping`] naming the column.
    ///
    /// Panics raised here do not reach the panic hook, the error is logged instead.
    pub fn assign(&self, target: &mut R, value: &Value, options: &Options) -> Result<()> {
        install_boundary_hook();
        let silenced = IN_BOUNDARY.replace(true);
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            (self.assign)(target, value, options)
        }));
        IN_BOUNDARY.set(silenced);
        let result = result.unwrap_or_else(|payload| {
            Err(anyhow::Error::msg(format!(
                "panicked while assigning `{}`: {}",
                self.binding.path,
                panic_message(payload.as_ref())
            )))
        });
        result.map_err(|e| {
            let error = Error::field_mapping(self.column(), e);
            log::error!("{}", error);
            error
        })
    }

    /// Rebase this binding on a parent record holding `R` in the field reached by `access`.
    pub fn nest<P: 'static>(
        &'static self,
        prefix: &str,
        access: fn(&mut P) -> &mut R,
    ) -> FieldBinding<P> {
        FieldBinding {
            binding: Binding {
                path: format!("{}.{}", prefix, self.binding.path),
                ..self.binding.clone()
            },
            assign: Box::new(move |target, value, options| {
                (self.assign)(access(target), value, options)
            }),
        }
    }
}

impl<R> Debug for FieldBinding<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.binding.fmt(f)
    }
}

thread_local! {
    static IN_BOUNDARY: Cell<bool> = const { Cell::new(false) };
}

static BOUNDARY_HOOK: Once = Once::new();

/// Wrap the current panic hook so that it skips panics raised inside a field assignment.
fn install_boundary_hook() {
    BOUNDARY_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !IN_BOUNDARY.get() {
                previous(info);
            }
        }));
    });
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic payload"
    }
}

/// Flattened field bindings of a record type, in declaration order.
///
/// Fields of nested records come before the slot of the field holding them. Fields whose tag
/// excludes them are dropped when the plan is built.
#[derive(Debug)]
pub struct Plan<R> {
    fields: Box<[FieldBinding<R>]>,
}

static PLANS: LazyLock<RwLock<HashMap<TypeId, &'static (dyn Any + Send + Sync)>>> =
    LazyLock::new(Default::default);

impl<R: 'static> Plan<R> {
    pub fn new(fields: impl IntoIterator<Item = FieldBinding<R>>) -> Self {
        Self {
            fields: fields
                .into_iter()
                .filter(|v| !v.binding.tag.is_excluded())
                .collect(),
        }
    }

    pub fn fields(&self) -> &[FieldBinding<R>] {
        &self.fields
    }

    /// The plan of `R`, built with `build` the first time it is requested in the process.
    pub fn cached(build: impl FnOnce() -> Self) -> &'static Self {
        let id = TypeId::of::<R>();
        if let Some(plan) = PLANS
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .copied()
            .and_then(|v| v.downcast_ref::<Self>())
        {
            return plan;
        }
        // Built outside the lock, nested records request their own plans
        let plan = build();
        let mut plans = PLANS.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = plans
            .get(&id)
            .copied()
            .and_then(|v| v.downcast_ref::<Self>())
        {
            return existing;
        }
        log::trace!(
            "Built the binding plan of {} with {} fields",
            any::type_name::<R>(),
            plan.fields.len()
        );
        let plan: &'static Self = Box::leak(Box::new(plan));
        plans.insert(id, plan);
        plan
    }
}

/// Type probe used by `#[derive(Record)]` to tell record fields from scalar fields.
#[doc(hidden)]
pub struct Probe<T>(PhantomData<T>);

impl<T> Probe<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for Probe<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Fields holding a record contribute the bindings of that record.
#[doc(hidden)]
pub trait ViaRecord<T> {
    fn nested<R: 'static>(
        &self,
        path: &str,
        access: fn(&mut R) -> &mut T,
    ) -> Vec<FieldBinding<R>>;
}

impl<T: Record> ViaRecord<T> for &Probe<T> {
    fn nested<R: 'static>(
        &self,
        path: &str,
        access: fn(&mut R) -> &mut T,
    ) -> Vec<FieldBinding<R>> {
        T::plan()
            .fields()
            .iter()
            .map(|field| field.nest(path, access))
            .collect()
    }
}

#[doc(hidden)]
pub trait ViaLeaf<T> {
    fn nested<R: 'static>(
        &self,
        _path: &str,
        _access: fn(&mut R) -> &mut T,
    ) -> Vec<FieldBinding<R>> {
        Vec::new()
    }
}

impl<T> ViaLeaf<T> for Probe<T> {}

/// Fields holding a scalar are bound to their column.
#[doc(hidden)]
pub trait ViaValue<T> {
    fn leaf<R: 'static>(
        &self,
        path: &str,
        tag: &str,
        access: fn(&mut R) -> &mut T,
    ) -> Option<FieldBinding<R>>;
}

impl<T: AsValue + 'static> ViaValue<T> for &Probe<T> {
    fn leaf<R: 'static>(
        &self,
        path: &str,
        tag: &str,
        access: fn(&mut R) -> &mut T,
    ) -> Option<FieldBinding<R>> {
        Some(FieldBinding::new(path, tag, access))
    }
}

/// Record fields have no column of their own.
#[doc(hidden)]
pub trait ViaNested<T> {
    fn leaf<R: 'static>(
        &self,
        path: &str,
        tag: &str,
        access: fn(&mut R) -> &mut T,
    ) -> Option<FieldBinding<R>>;
}

impl<T: Record> ViaNested<T> for Probe<T> {
    fn leaf<R: 'static>(
        &self,
        _path: &str,
        _tag: &str,
        _access: fn(&mut R) -> &mut T,
    ) -> Option<FieldBinding<R>> {
        None
    }
}
