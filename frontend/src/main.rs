fn main() {
    staffdesk_frontend::start();
}
