pub mod context;
pub mod loader;
pub mod materialize;

pub use context::{Coercion, Container, Context, Keywords, Term};
pub use loader::{ContextLoader, NoRemoteContexts, StaticContextLoader};
pub use materialize::{Materializer, materialize, resolve_context, to_rdf};
