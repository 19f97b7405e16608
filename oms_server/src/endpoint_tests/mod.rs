mod catalog;
mod helpers;
mod orders;
