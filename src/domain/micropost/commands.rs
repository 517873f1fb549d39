use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct CreateMicropost {
	#[serde(default)]
	pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteMicropost {
	pub id: i64,
}
