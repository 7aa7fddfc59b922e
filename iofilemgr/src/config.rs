//! 一些配置

use crate::flags::IoMode;

// read_to_end每次读取的字节数
pub const READ_CHUNK_SIZE: usize = 512;

// 创建文件/目录时默认的权限，即0o777
pub const DEFAULT_MODE: IoMode = IoMode::all();

// 传给ksceIoMount/ksceIoUmount的未知参数
pub const MOUNT_RESERVED_ARGS: [i32; 3] = [0, 0, 0];
