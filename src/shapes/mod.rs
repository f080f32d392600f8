// Copyright @yucwang 2023

pub mod triangle;
