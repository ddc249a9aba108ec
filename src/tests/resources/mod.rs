mod container_tests;
mod host_tests;
mod vm_tests;
