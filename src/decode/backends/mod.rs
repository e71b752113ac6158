pub mod rqrr;
pub mod stub;
