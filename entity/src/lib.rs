pub mod article;
pub mod journalist_subscription;
pub mod password_reset;
pub mod publisher;
pub mod publisher_subscription;
pub mod user;
pub mod user_publisher;

/*
 Readers follow journalists and publishers, they never write.
 Journalists and editors are "staff" and belong to one or more publishers through user_publisher,
 joined at signup with the publisher's access password. Editors are capped at one publisher.
 Articles are authored by a journalist and optionally submitted to one publisher for review.
 */
