pub mod custom_head;
