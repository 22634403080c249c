mod optimizer;

pub(crate) use optimizer::Optimizer;
pub use optimizer::INFILL_MAX_EVAL_DEFAULT;
