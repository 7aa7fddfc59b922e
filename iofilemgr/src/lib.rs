//! 内核态文件I/O管理器（SceIofilemgrForDriver）的接口
//!
//! - `consts`/`types`/`ffi`：与内核二进制兼容的常量、结构体和函数原型
//! - `IoManager`/`File`：在`IoBackend`之上的安全封装
//! - `mock`：在主机上代替内核的后端，用于测试和工具
#![cfg_attr(not(test), no_std)]
extern crate alloc;
#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate log;

mod backend;
mod config;
pub mod consts;
mod error;
#[cfg(target_os = "vita")]
pub mod ffi;
mod file;
mod flags;
mod manager;
pub mod mock;
mod path;
mod types;

pub use backend::{install_backend, IoBackend};
#[cfg(target_os = "vita")]
pub use backend::KernelBackend;
pub use error::{Errno, Error, Result};
pub use file::{File, OpenOptions};
pub use flags::{DeviceType, IoMode, OpenFlags, SeekFrom};
pub use manager::IoManager;
pub use path::CPath;
pub use types::*;
