pub(crate) mod expected;
pub(crate) mod helpers;
pub(crate) mod rscript;
pub(crate) mod run;
