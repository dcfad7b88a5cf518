//! Document tree to HTML help fragments.
//!
//! The transducer runs in two passes per document:
//!
//! 1. [`DocumentIndex::build`] collects known heading texts and the routes
//!    attached to them through suggested `[route, ...]` annotations.
//! 2. [`walk_document`] folds over the structural elements, closing one
//!    [`HelpRecord`] per route each time a heading boundary is crossed.
//!
//! Records from every document are merged into a [`HelpStore`], which can be
//! regrouped by heading with [`HelpStore::by_heading`].
//!
//! Nothing here performs I/O: images arrive pre-resolved as [`ImageAsset`]s.

mod image;
mod index;
mod list;
mod store;
mod style;
mod subsystem;
mod table;
mod walker;

pub use image::{ImageAsset, ImageAssets, SCALE_FACTOR, image_extension};
pub use index::{DocumentIndex, parse_route_annotation};
pub use list::ListAccumulator;
pub use store::{HeadingEntry, HeadingView, HelpRecord, HelpStore, RouteRecord};
pub use style::{RunText, escape_html};
pub use subsystem::{Subsystem, UnknownSubsystem};
pub use table::render_table;
pub use walker::{WalkContext, WalkState, walk_document};
