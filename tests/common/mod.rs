pub mod subcs_bin;
