fn main() {
    hospedaje_frontend::start_app();
}
