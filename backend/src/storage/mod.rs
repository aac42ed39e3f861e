pub mod fs_service;
