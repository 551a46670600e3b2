pub mod a001_insured;
pub mod a002_vehicle;
pub mod a003_insurance;
pub mod a004_check;
pub mod a005_insurance_company;
pub mod a006_ahlia_report;
pub mod a007_mashreq_report;
pub mod a008_palestine_report;
pub mod a009_trust_report;
