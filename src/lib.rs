/*!
# Global Power Plant Explorer

A browser-based explorer for the Global Power Plant Database, built in Rust.

## Overview

The application loads a static CSV of power plants once at startup, caches it
process-wide as a read-only table, and serves a single interactive page: pick
a country and a primary fuel, and the page shows the matching plants on a
geographic scatter map and in a tabular listing. Optional image panels (an
infographic, an eight-image estimation walkthrough, and a footer logo) are
displayed when the corresponding files exist next to the data.

## Architecture

The application follows a client-server architecture:

### Frontend Layer
- **Technologies**: HTML, CSS, Leaflet
- Single static page served by the backend; all views are recomputed from the
  current filter selections via JSON endpoints.

### Backend Layer
- **Technologies**: Rust, axum
- **Core Components**:
  - Dataset Loader - CSV ingestion with per-cell coercion of malformed values
  - Filter Resolver - distinct dropdown options and the two-dimension row
    predicate
  - Map Renderer - marker position/size/color/hover encodings for the
    filtered subset
  - Table View - direct listing of the filtered subset
  - Static Asset Panels - independent existence checks for optional images

Every render is a pure function of (table, current selections): there is no
mutation after load, no background work, and no cross-session shared mutable
state beyond the read-only table itself.

## Error handling

- Fatal: the dataset file is missing or unparseable at startup.
- Per-cell: a malformed value in a typed column becomes a missing cell; the
  row is kept.
- Per-row: missing coordinates exclude a row from the map only; the table
  still lists it.
- Per-feature: a missing optional image blanks its own panel only.

## Modules

- **record**: the PowerPlant row type and per-cell value coercion
- **dataset**: CSV loading and the process-wide read-only cache
- **filter**: filter options and subset computation
- **map**: the map figure (points, sizes, colors, hover cards)
- **table**: the tabular listing
- **assets**: the optional image catalog
- **app**: routing and handlers

## REST API Endpoints

- `/api/options` - dropdown values for both filter dimensions
- `/api/plants?country=&fuel=` - the filtered table rows
- `/api/map?country=&fuel=` - the map figure for the same subset
- `/api/assets` - which optional images are present
- `/assets/{name}` - image bytes for the fixed asset catalog
*/

pub mod app;
pub mod assets;
pub mod dataset;
pub mod filter;
pub mod map;
pub mod record;
pub mod table;

/// Re-export the core types to make the library easier to use
pub use dataset::{Dataset, DatasetError};
pub use filter::Selection;
pub use record::PowerPlant;
