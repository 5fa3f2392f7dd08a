//! Route tables shipped with each front-end.

use super::table::{RouteEntry, RouteTable};
use crate::config::Frontend;

const NOT_FOUND: &str = "/:pathMatch(.*)*";

impl RouteTable {
    pub fn for_frontend(frontend: Frontend) -> Self {
        match frontend {
            Frontend::Admin => admin(),
            Frontend::Customer => customer(),
            Frontend::Staff => staff(),
            Frontend::Store => store(),
        }
    }
}

fn login() -> RouteEntry {
    RouteEntry::new("/login", "Login").name("Login").title("Sign in")
}

fn not_found() -> RouteEntry {
    RouteEntry::new(NOT_FOUND, "NotFound").name("NotFound")
}

fn page(path: &str, name: &str, component: &str, title: &str, icon: &str) -> RouteEntry {
    RouteEntry::new(path, component).name(name).title(title).icon(icon)
}

fn sub(path: &str, name: &str, component: &str, title: &str) -> RouteEntry {
    RouteEntry::new(path, component).name(name).title(title).hidden()
}

pub fn admin() -> RouteTable {
    RouteTable::new()
        .add(login())
        .add(RouteEntry::new("/", "Layout").redirect("/dashboard").children(vec![
            page("dashboard", "Dashboard", "Dashboard", "Dashboard", "DataBoard"),
            page("stores", "Stores", "Stores/Index", "Stores", "Shop"),
            sub("stores/create", "StoreCreate", "Stores/Create", "New store"),
            sub("stores/:id/edit", "StoreEdit", "Stores/Edit", "Edit store"),
            page("bookings", "Bookings", "Bookings/Index", "Bookings", "Calendar"),
            page("members", "Members", "Members/Index", "Members", "User"),
            sub("members/create", "MemberCreate", "Members/Form", "New member"),
            sub("members/:id", "MemberDetail", "Members/Detail", "Member details"),
            sub("members/:id/edit", "MemberEdit", "Members/Form", "Edit member"),
            sub("members/:id/usages", "MemberUsages", "Members/Usages", "Usage history"),
            page("users", "Users", "Users/Index", "Staff", "UserFilled"),
            sub("users/create", "UserCreate", "Users/Create", "New staff member"),
            sub("users/:id/edit", "UserEdit", "Users/Edit", "Edit staff member"),
            page("payments", "Payments", "Payments/Index", "Payments", "Money"),
            page("reports", "Reports", "Reports/Index", "Reports", "DataAnalysis"),
            page("templates", "Templates", "Templates/Index", "Slot templates", "Clock"),
            sub("templates/create", "TemplateCreate", "Templates/Form", "New slot template"),
            sub("templates/:id/edit", "TemplateEdit", "Templates/Form", "Edit slot template"),
            page("profile", "Profile", "Profile", "Profile", "User").hidden(),
        ]))
        .add(not_found())
}

pub fn customer() -> RouteTable {
    RouteTable::new()
        .add(RouteEntry::new("/", "Layout").redirect("/home").children(vec![
            page("home", "Home", "Home", "Home", "home-o"),
            page("booking", "Booking", "Booking/Index", "Book", "calendar-o"),
            sub("booking/create", "BookingCreate", "Booking/Create", "New booking"),
            page("member", "Member", "Member/Index", "Membership", "vip-card-o"),
            sub("member/code/:id", "MemberCode", "Member/Code", "Member code"),
            sub("booking/:id/payment", "BookingPayment", "Booking/Payment", "Pay deposit"),
            page("profile", "Profile", "Profile", "Me", "user-o"),
        ]))
        .add(login().hidden())
        .add(not_found())
}

pub fn staff() -> RouteTable {
    RouteTable::new()
        .add(login())
        .add(RouteEntry::new("/", "Layout").redirect("/dashboard").children(vec![
            page("dashboard", "Dashboard", "Dashboard", "Workbench", "home-o"),
            page("bookings", "Bookings", "Bookings/Index", "My schedule", "calendar-o"),
            page("scanner", "Scanner", "Scanner", "Scan member code", "scan"),
            page("profile", "Profile", "Profile", "Me", "user-o"),
        ]))
        .add(not_found())
}

pub fn store() -> RouteTable {
    RouteTable::new()
        .add(login())
        .add(RouteEntry::new("/", "Layout").redirect("/dashboard").children(vec![
            page("dashboard", "Dashboard", "Dashboard", "Dashboard", "chart-trending-o"),
            page("staff", "Staff", "Staff/Index", "Staff", "friends-o"),
            sub("staff/create", "StaffCreate", "Staff/Create", "Add staff member"),
            page("members", "Members", "Members/Index", "Members", "vip-card-o"),
            sub("members/create", "MemberCreate", "Members/Create", "New member"),
            page("profile", "Profile", "Profile", "Me", "user-o"),
        ]))
        .add(not_found())
}
