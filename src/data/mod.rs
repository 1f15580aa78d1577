/// Data layer: core types, loading, and searching.
///
/// Architecture:
/// ```text
///   job_data.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse header + records → Table (all or nothing)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Table    │  header columns, Vec<Row> in file order
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  distinct values / substring scans → Vec<Row>
///   └──────────┘
/// ```

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
