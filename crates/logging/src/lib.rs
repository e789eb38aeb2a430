#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` is a small hierarchical logging facility built around numeric
//! severities. Records are produced through named [`Logger`]s, filtered by the
//! level configured for their dotted category (or the nearest ancestor that
//! has one), rendered through a `%(key)s` [`Format`] template, and written to
//! a single [`Sink`] owned by the [`Registry`].
//!
//! # Design
//!
//! - [`Severity`] is an open integer scale. The standard levels (`DEBUG` 10
//!   through `CRITICAL` 50) are predefined, and any other value may be given a
//!   display name with [`register_level_name`].
//! - [`Registry`] stores category levels and the installed sink. It is a cheap
//!   clonable handle; [`Registry::global`] is the process-wide instance and
//!   [`Registry::new`] creates an isolated one for embedding and tests.
//! - [`Registry::basic_config`] performs one-shot setup: it sets the root
//!   level and installs a [`StreamSink`] unless a sink is already present.
//! - With the `tracing` feature, [`RegistryLayer`] routes `tracing` events
//!   through the same category levels.
//!
//! # Invariants
//!
//! - The root level starts at [`Severity::WARNING`].
//! - A record is emitted only when its severity is at least the effective level
//!   of its category and at least the sink threshold.
//! - Without a sink, records at `WARNING` and above still reach standard error.
//!
//! # Errors
//!
//! Template problems surface as [`FormatError`] from [`Format::parse`]. Write
//! failures are returned by [`Registry::handle`] and reported on standard error
//! by the logging methods, which never fail.
//!
//! # Examples
//!
//! ```
//! use logging::{BasicConfig, Format, Registry, SharedBuffer, Severity, register_level_name};
//!
//! let registry = Registry::new();
//! let output = SharedBuffer::new();
//! registry.basic_config(
//!     BasicConfig::new()
//!         .level(Severity::INFO)
//!         .format(Format::parse("%(levelname)s %(name)s %(message)s")?)
//!         .stream(Box::new(output.clone())),
//! );
//!
//! let chatty = Severity::new(19);
//! register_level_name(chatty, "CHATTY");
//! registry.set_level("net", chatty);
//!
//! registry.logger("net.peer").log(chatty, "peer connected");
//! registry.logger("disk").log(chatty, "hidden below INFO");
//!
//! assert_eq!(output.contents(), "CHATTY net.peer peer connected\n");
//! # Ok::<(), logging::FormatError>(())
//! ```

mod format;
mod levels;
mod line_mode;
mod macros;
mod record;
mod registry;
mod sink;

#[cfg(feature = "tracing")]
mod tracing_bridge;

pub use format::{DEFAULT_FORMAT, Format, FormatError};
pub use levels::{ParseSeverityError, Severity, level_for_name, level_name, register_level_name};
pub use line_mode::LineMode;
pub use record::{ROOT_NAME, Record};
pub use registry::{BasicConfig, Logger, Registry, get_logger};
pub use sink::{CaptureSink, SharedBuffer, Sink, StreamSink};

#[cfg(feature = "tracing")]
pub use tracing_bridge::{RegistryLayer, TRACE, init_tracing};
