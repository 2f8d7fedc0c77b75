pub mod shared {
    pub mod infrastructure {
        pub mod sqlite;
    }
}

pub mod modules {
    pub mod smart_meters {
        pub mod core {
            pub mod billing;
            pub mod meter;
            pub mod ports;
            pub mod seed;
            pub mod status;
        }
        pub mod use_cases {
            pub mod query_meter {
                pub mod handler;
                pub mod tools;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                    pub mod mcp;
                }
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod meter_store_in_memory;
                pub mod meter_store_sqlite;
            }
        }
    }
}

pub mod shell;
