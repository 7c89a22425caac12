/// Newton-Raphson for one equation of one variable
pub mod NR_1D;
/// root-plot requests, single and batched
pub mod newton_plot;
/// plot description: curve and root markers
pub mod plots;
/// integer snapping of roots and their labels
pub mod root_check;
/// sampling interval and the root existence test
pub mod sample_domain;
