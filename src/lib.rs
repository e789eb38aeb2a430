#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `vmodule` configures the [`logging`] facility from two operator inputs: a
//! global verbosity and a per-category override string such as
//! `"net.peer=2,db=1"`. It also adds three verbose severities, [`VLOG_1`],
//! [`VLOG_2`] and [`VLOG_3`], one, two and three points below `INFO`.
//!
//! # Design
//!
//! - [`vmodule_init`] configures the process-wide [`Registry`]. The same
//!   inputs can be collected in a [`VmoduleConfig`] and applied to any
//!   registry with [`VmoduleConfig::apply`].
//! - The global verbosity sets the root level: unset is `WARNING`, `0` is
//!   `INFO`, and `n` is `INFO - n`, so `10` reaches `DEBUG`.
//! - Each override item `name=level` sets that category to `INFO - level`.
//!   Here `0` simply means `INFO`.
//! - Categories without an override inherit from their nearest configured
//!   ancestor, then from the root.
//!
//! # Errors
//!
//! [`VmoduleError`] reports a verbosity or override level that is not an
//! integer, and a record template that does not parse.
//!
//! # Examples
//!
//! ```
//! use vmodule::{Registry, Severity, SharedBuffer, VLOG_1, VLOG_2, VmoduleConfig};
//!
//! let registry = Registry::new();
//! let output = SharedBuffer::new();
//! VmoduleConfig::new()
//!     .with_vmodule("x.y.z=1")
//!     .with_format("%(levelname)-8s %(name)s %(message)s")
//!     .apply(&registry, Some(Box::new(output.clone())))?;
//!
//! registry.logger("a.b.c").warning("Warn");
//! registry.logger("a.b.c").info("Info");
//! registry.logger("x.y.z").log(VLOG_1, "Vlog 1");
//! registry.logger("x.y.z").log(VLOG_2, "Vlog 2");
//!
//! assert_eq!(
//!     output.contents(),
//!     "WARNING  a.b.c Warn\nVLOG_1   x.y.z Vlog 1\n"
//! );
//! assert_eq!(registry.root_level(), Severity::WARNING);
//! # Ok::<(), vmodule::VmoduleError>(())
//! ```

mod config;
mod error;
mod init;
mod levels;

pub use config::{
    VmoduleConfig, override_threshold, parse_override, parse_verbosity, verbosity_threshold,
};
pub use error::VmoduleError;
pub use init::{SELF_CATEGORY, vmodule_init};
pub use levels::{VLOG_1, VLOG_2, VLOG_3, register_vlog_levels};

pub use logging;
pub use logging::{
    DEFAULT_FORMAT, Format, FormatError, LineMode, Logger, Registry, SharedBuffer, Severity,
    get_logger,
};
