pub mod fcm_server;
