fn main() {
  nutrition_planner_lib::run()
}
