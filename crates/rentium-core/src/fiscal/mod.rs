pub mod analysis;
pub mod regime;

pub use analysis::{analyze_fiscal, FiscalAnalysis};
pub use regime::{taxable_base, TaxMode};
