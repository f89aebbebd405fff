pub mod banner;
pub mod consts;
pub mod guestbook;
pub mod identity;
pub mod web;
