use oplib_sdk::OpDef;

pub const GET_BYTES: &str = "GetBytes";

/// `GetBytes(address, request) -> (reply)`: fetch bytes from the service at
/// `address`. Stateful, scalar string inputs and outputs.
pub fn get_bytes_op_def() -> OpDef {
    OpDef::builder(GET_BYTES)
        .input("address")
        .input("request")
        .output("reply")
        .stateful()
        .doc("get bytes from a service")
        .build()
}
