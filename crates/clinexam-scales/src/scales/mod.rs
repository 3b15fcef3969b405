pub mod bisap;
pub mod child_pugh;
pub mod curb65;
pub mod das28_crp;
pub mod fibromyalgia;
pub mod gcs;
pub mod glasgow_blatchford;
pub mod isth_bat;
pub mod meld_na;
pub mod nihss;
pub mod qsofa;
pub mod sirs;
pub mod sledai_2k;
pub mod wells_dvt;
