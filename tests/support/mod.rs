#![allow(dead_code)]

pub mod data;
pub mod db;
pub mod source;
