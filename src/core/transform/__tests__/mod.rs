pub mod basis_test;
pub mod fast_dct_test;
