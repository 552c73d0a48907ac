pub mod stsim_vis3d;
